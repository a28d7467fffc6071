use image::{DynamicImage, Rgb, RgbImage};
use std::fmt;
use std::sync::Arc;

/// Immutable RGB snapshot shared between the sampler, the scorer and the model.
#[derive(Clone, PartialEq)]
pub struct Frame(Arc<RgbImage>);

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgb8())
    }

    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::new(RgbImage::from_pixel(width, height, Rgb(rgb)))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn same_dimensions(&self, other: &Frame) -> bool {
        self.0.dimensions() == other.0.dimensions()
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgb<u8>> {
        self.0.pixels()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}x{})", self.width(), self.height())
    }
}
