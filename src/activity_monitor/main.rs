use crate::activity_classifier::interface::ActivityClassifier;
use crate::activity_monitor::core::{init, Event, Model};
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Clone)]
pub struct ActivityMonitor {
    /// Latest model, for readers outside the event loop.
    pub model: Arc<Mutex<Model>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub activity_classifier: Arc<dyn ActivityClassifier + Send + Sync>,
    /// Set when `run` returns. Long-lived effect threads exit on it.
    pub stopped: Arc<AtomicBool>,
}

impl ActivityMonitor {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        activity_classifier: Arc<dyn ActivityClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let (initial, _) = init(&config);

        Self {
            model: Arc::new(Mutex::new(initial)),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            config,
            logger,
            device_camera,
            device_display,
            activity_classifier,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ask for a classification now, regardless of motion or cooldown. Ignored
    /// while one is running or when the camera is not ready.
    pub fn force_analysis(&self) {
        let _ = self.event_sender.send(Event::ForceAnalysis(Instant::now()));
    }

    pub fn shutdown(&self) {
        let _ = self.event_sender.send(Event::Shutdown);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Option<Model> {
        self.model.lock().ok().map(|model| model.clone())
    }
}
