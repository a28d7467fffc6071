use crate::device_camera::interface::{CameraRequest, DeviceCamera};
use crate::library::logger::interface::Logger;
use image::{imageops::FilterType, DynamicImage};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

struct Playback {
    started_at: Instant,
    paths: Vec<PathBuf>,
    current: Option<(usize, DynamicImage)>,
}

/// Replays a directory of stills as if it were a live camera, advancing one
/// still per `frame_interval`.
pub struct DeviceCameraImageSequence {
    dir: PathBuf,
    request: CameraRequest,
    frame_interval: Duration,
    playback: Mutex<Option<Playback>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraImageSequence {
    pub fn new(
        dir: PathBuf,
        request: CameraRequest,
        frame_interval: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            dir,
            request,
            frame_interval,
            playback: Mutex::new(None),
            logger: logger.with_namespace("camera").with_namespace("image_sequence"),
        }
    }

    fn frame_index(&self, elapsed: Duration, len: usize) -> usize {
        let interval = self.frame_interval.as_millis().max(1);
        ((elapsed.as_millis() / interval) % len as u128) as usize
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let image = image::open(path)?;
        if image.width() == self.request.ideal_width && image.height() == self.request.ideal_height
        {
            return Ok(image);
        }
        Ok(image.resize_exact(
            self.request.ideal_width,
            self.request.ideal_height,
            FilterType::Triangle,
        ))
    }
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if supported && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

impl DeviceCamera for DeviceCameraImageSequence {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Opening image sequence in {}", self.dir.display()))?;

        let paths = list_images(&self.dir)?;
        if paths.is_empty() {
            return Err(format!("no images found in {}", self.dir.display()).into());
        }

        self.logger
            .info(&format!("Replaying {} stills", paths.len()))?;

        let mut playback = self.playback.lock().map_err(|e| e.to_string())?;
        *playback = Some(Playback {
            started_at: Instant::now(),
            paths,
            current: None,
        });
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut playback = self.playback.lock().map_err(|e| e.to_string())?;
        if playback.take().is_some() {
            self.logger.info("Image sequence closed")?;
        }
        Ok(())
    }

    fn capture_frame(
        &self,
    ) -> Result<Option<DynamicImage>, Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.playback.lock().map_err(|e| e.to_string())?;
        let playback = match guard.as_mut() {
            Some(playback) => playback,
            None => return Ok(None),
        };

        let index = self.frame_index(playback.started_at.elapsed(), playback.paths.len());

        if let Some((current_index, image)) = &playback.current {
            if *current_index == index {
                return Ok(Some(image.clone()));
            }
        }

        let image = self.load(&playback.paths[index])?;
        playback.current = Some((index, image.clone()));
        Ok(Some(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_camera::interface::Facing;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{Rgb, RgbImage};

    fn camera(dir: PathBuf) -> DeviceCameraImageSequence {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        DeviceCameraImageSequence::new(
            dir,
            CameraRequest {
                ideal_width: 64,
                ideal_height: 48,
                facing: Facing::User,
            },
            Duration::from_millis(200),
            logger,
        )
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "activity-monitor-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_directory_is_unavailable() {
        let dir = scratch_dir("empty");
        std::fs::write(dir.join("notes.txt"), "not an image").unwrap();
        let camera = camera(dir.clone());
        assert!(camera.start().is_err());
        assert!(camera.capture_frame().unwrap().is_none());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_stills_are_resized_to_request() {
        let dir = scratch_dir("resize");
        RgbImage::from_pixel(320, 240, Rgb([10, 200, 30]))
            .save(dir.join("a.png"))
            .unwrap();
        let camera = camera(dir.clone());
        camera.start().unwrap();
        let frame = camera.capture_frame().unwrap().unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 48));
        camera.stop().unwrap();
        assert!(camera.capture_frame().unwrap().is_none());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_frame_index_cycles() {
        let camera = camera(PathBuf::from("."));
        assert_eq!(camera.frame_index(Duration::from_millis(0), 3), 0);
        assert_eq!(camera.frame_index(Duration::from_millis(450), 3), 2);
        assert_eq!(camera.frame_index(Duration::from_millis(600), 3), 0);
    }
}
