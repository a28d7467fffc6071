use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Releases the camera when dropped, whichever way the owning scope exits.
pub struct CameraGuard {
    camera: Arc<dyn DeviceCamera + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraGuard {
    pub fn new(
        camera: Arc<dyn DeviceCamera + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self { camera, logger }
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop() {
            let _ = self
                .logger
                .error(&format!("Failed to release camera: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::DynamicImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCamera {
        stops: AtomicUsize,
    }

    impl DeviceCamera for CountingCamera {
        fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn capture_frame(
            &self,
        ) -> Result<Option<DynamicImage>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(None)
        }
    }

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    #[test]
    fn test_drop_stops_camera() {
        let camera = Arc::new(CountingCamera::default());
        {
            let _guard = CameraGuard::new(camera.clone(), logger());
        }
        assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unwinding_stops_camera() {
        let camera = Arc::new(CountingCamera::default());
        let inner = camera.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = CameraGuard::new(inner, logger());
            panic!("event loop crashed");
        }));
        assert!(result.is_err());
        assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    }
}
