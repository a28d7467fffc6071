use activity_classifier::impl_fake::ActivityClassifierFake;
use activity_classifier::impl_gemini::ActivityClassifierGemini;
use activity_classifier::interface::ActivityClassifier;
use activity_monitor::main::ActivityMonitor;
use config::{Config, DisplayKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_image_sequence::DeviceCameraImageSequence;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod activity;
mod activity_classifier;
mod activity_monitor;
mod analysis;
mod config;
mod device_camera;
mod device_display;
mod error;
mod frame;
mod gate;
mod history;
mod library;
mod motion;

const FAKE_CLASSIFIER_LATENCY: Duration = Duration::from_millis(800);
const STILL_FRAME_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.camera_dir {
        Some(dir) => Arc::new(DeviceCameraImageSequence::new(
            dir.clone(),
            config.camera,
            STILL_FRAME_INTERVAL,
            logger.clone(),
        )),
        None => Arc::new(DeviceCameraFake::new(config.camera, logger.clone())),
    };

    let activity_classifier: Arc<dyn ActivityClassifier + Send + Sync> =
        if config.classifier.api_key.is_some() {
            Arc::new(ActivityClassifierGemini::new(
                config.classifier.clone(),
                config.system_instruction.clone(),
                logger.clone(),
            )?)
        } else {
            let _ = logger.info("No API key set, using the fake classifier");
            Arc::new(ActivityClassifierFake::new(
                FAKE_CLASSIFIER_LATENCY,
                logger.clone(),
            ))
        };

    let mut window = None;
    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayKind::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayKind::Gui => {
            let gui = DeviceDisplayGui::new();
            window = Some(gui.window());
            Arc::new(Mutex::new(gui))
        }
    };

    let activity_monitor = ActivityMonitor::new(
        config,
        logger,
        device_camera,
        device_display,
        activity_classifier,
    );

    let Some(window) = window else {
        activity_monitor.run().map_err(|e| e.to_string())?;
        return Ok(());
    };

    // The window needs the main thread, so the monitor runs beside it.
    let monitor = activity_monitor.clone();
    let handle = std::thread::spawn(move || monitor.run());

    if let Err(e) = window.run() {
        let _ = activity_monitor
            .logger
            .error(&format!("Dashboard window failed: {}", e));
    }

    handle
        .join()
        .map_err(|_| "activity monitor thread panicked")?
        .map_err(|e| e.to_string())?;

    Ok(())
}
