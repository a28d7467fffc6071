use crate::device_camera::interface::DeviceCamera;
use crate::frame::Frame;
use crate::library::logger::interface::Logger;
use image::{imageops::FilterType, DynamicImage};
use std::sync::Arc;

/// Pulls the live frame and shrinks it to the analysis resolution.
#[derive(Clone)]
pub struct FrameSampler {
    width: u32,
    height: u32,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FrameSampler {
    pub fn new(width: u32, height: u32, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            width,
            height,
            logger: logger.with_namespace("sampler"),
        }
    }

    pub fn downsample(&self, image: &DynamicImage) -> Frame {
        if image.width() == self.width && image.height() == self.height {
            return Frame::from_dynamic(image);
        }
        Frame::from_dynamic(&image.resize_exact(self.width, self.height, FilterType::Triangle))
    }

    /// `None` when the camera has nothing to give this tick.
    pub fn sample(&self, camera: &dyn DeviceCamera) -> Option<Frame> {
        match camera.capture_frame() {
            Ok(Some(image)) => Some(self.downsample(&image)),
            Ok(None) => None,
            Err(e) => {
                let _ = self.logger.error(&format!("Frame capture failed: {}", e));
                None
            }
        }
    }
}
