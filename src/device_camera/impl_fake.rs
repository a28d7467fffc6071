use crate::device_camera::interface::{CameraRequest, DeviceCamera};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const FRAME_PERIOD: Duration = Duration::from_millis(200);
const SCENE_PERIOD_SECS: u64 = 10;
const ACTIVE_SECS: u64 = 4;

const BACKGROUND: Rgb<u8> = Rgb([40, 44, 52]);
const FIGURE: Rgb<u8> = Rgb([214, 160, 120]);

/// Synthetic webcam: a still room where a figure paces back and forth for
/// a few seconds out of every ten.
pub struct DeviceCameraFake {
    request: CameraRequest,
    started_at: Mutex<Option<Instant>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(request: CameraRequest, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            request,
            started_at: Mutex::new(None),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }

    fn render_scene(&self, elapsed: Duration) -> RgbImage {
        let width = self.request.ideal_width;
        let height = self.request.ideal_height;
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

        let active = elapsed.as_secs() % SCENE_PERIOD_SECS < ACTIVE_SECS;
        let step = (elapsed.as_millis() / FRAME_PERIOD.as_millis()) as u32;

        let figure_width = width * 2 / 5;
        let figure_height = height * 4 / 5;
        let left = if active && step % 2 == 1 {
            width - figure_width
        } else {
            0
        };
        let top = height - figure_height;

        for y in top..height {
            for x in left..left + figure_width {
                image.put_pixel(x, y, FIGURE);
            }
        }

        image
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Starting camera at {}x{} ({:?} facing)...",
            self.request.ideal_width, self.request.ideal_height, self.request.facing
        ))?;
        let mut started_at = self.started_at.lock().map_err(|e| e.to_string())?;
        *started_at = Some(Instant::now());
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut started_at = self.started_at.lock().map_err(|e| e.to_string())?;
        if started_at.take().is_some() {
            self.logger.info("Camera stopped")?;
        }
        Ok(())
    }

    fn capture_frame(
        &self,
    ) -> Result<Option<DynamicImage>, Box<dyn std::error::Error + Send + Sync>> {
        let started_at = *self.started_at.lock().map_err(|e| e.to_string())?;
        Ok(started_at.map(|start| DynamicImage::ImageRgb8(self.render_scene(start.elapsed()))))
    }
}
