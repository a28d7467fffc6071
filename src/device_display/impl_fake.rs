use crate::device_display::interface::{blank_lines, fit_line, DeviceDisplay, DisplayEvent};
use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Keeps the last presented frame in memory and lets tests inject events.
pub struct DeviceDisplayFake {
    pending: Vec<String>,
    presented: Arc<Mutex<Vec<String>>>,
    event_senders: Arc<Mutex<Vec<Sender<DisplayEvent>>>>,
}

#[derive(Clone)]
pub struct DeviceDisplayFakeHandle {
    presented: Arc<Mutex<Vec<String>>>,
    event_senders: Arc<Mutex<Vec<Sender<DisplayEvent>>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            presented: Arc::new(Mutex::new(Vec::new())),
            event_senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handle(&self) -> DeviceDisplayFakeHandle {
        DeviceDisplayFakeHandle {
            presented: self.presented.clone(),
            event_senders: self.event_senders.clone(),
        }
    }
}

impl DeviceDisplayFakeHandle {
    pub fn lines(&self) -> Vec<String> {
        self.presented
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn send(&self, event: DisplayEvent) {
        if let Ok(senders) = self.event_senders.lock() {
            for sender in senders.iter() {
                let _ = sender.send(event);
            }
        }
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending = blank_lines(self.num_lines());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending = blank_lines(self.num_lines());
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if line >= self.num_lines() {
            return Err("Invalid line number".into());
        }
        if self.pending.len() != self.num_lines() {
            self.pending = blank_lines(self.num_lines());
        }
        self.pending[line] = fit_line(text, self.chars_per_line());
        Ok(())
    }

    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut presented = self.presented.lock().map_err(|e| e.to_string())?;
        *presented = self.pending.clone();
        Ok(())
    }

    fn events(&self) -> Receiver<DisplayEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut senders) = self.event_senders.lock() {
            senders.push(tx);
        }
        rx
    }
}
