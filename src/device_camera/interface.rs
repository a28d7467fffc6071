use image::DynamicImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    User,
    Environment,
}

/// What the monitor asks of a camera. Implementations treat the size as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraRequest {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing: Facing,
}

pub trait DeviceCamera {
    /// Acquire the live source. An error means the camera is unavailable.
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Release every acquired track. Safe to call on a camera that never started.
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// The current live frame at native resolution, or `None` when no frame is ready yet.
    fn capture_frame(
        &self,
    ) -> Result<Option<DynamicImage>, Box<dyn std::error::Error + Send + Sync>>;
}
