pub mod impl_fake;
pub mod impl_gemini;
pub mod interface;
