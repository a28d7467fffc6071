pub mod guard;
pub mod impl_fake;
pub mod impl_image_sequence;
pub mod interface;
