use crate::device_display::interface::{blank_lines, fit_line, DeviceDisplay, DisplayEvent};
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

/// The native window showing what `DeviceDisplayGui` presents. Most platforms
/// only allow the event loop on the main thread, so the caller owns this and
/// runs it there.
#[derive(Clone)]
pub struct DashboardWindow {
    lines: Arc<Mutex<Vec<String>>>,
    event_senders: Arc<Mutex<Vec<Sender<DisplayEvent>>>>,
}

impl DashboardWindow {
    fn send(&self, event: DisplayEvent) {
        if let Ok(senders) = self.event_senders.lock() {
            for sender in senders.iter() {
                let _ = sender.send(event);
            }
        }
    }

    /// Blocks until the window is closed. The monitor is asked to quit on the
    /// way out, including when the window fails to open.
    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let _quit_on_close = QuitOnClose(self.clone());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([560.0, 480.0])
                .with_resizable(true),
            ..Default::default()
        };

        eframe::run_native(
            "Activity Monitor",
            options,
            Box::new(|_cc| Box::new(self)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

struct QuitOnClose(DashboardWindow);

impl Drop for QuitOnClose {
    fn drop(&mut self) {
        self.0.send(DisplayEvent::Quit);
    }
}

impl eframe::App for DashboardWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let lines = match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(_) => return,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_rgb(15, 23, 42));
            ui.painter().rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(51, 65, 85)),
            );

            ui.add_space(8.0);
            for line in lines.iter() {
                ui.label(
                    egui::RichText::new(line)
                        .monospace()
                        .color(egui::Color32::from_rgb(226, 232, 240))
                        .size(14.0),
                );
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Force Analysis").clicked() {
                    self.send(DisplayEvent::ForceAnalysis);
                }
                if ui.button("Quit").clicked() {
                    self.send(DisplayEvent::Quit);
                }
            });
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

pub struct DeviceDisplayGui {
    pending: Vec<String>,
    lines: Arc<Mutex<Vec<String>>>,
    event_senders: Arc<Mutex<Vec<Sender<DisplayEvent>>>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            lines: Arc::new(Mutex::new(Vec::new())),
            event_senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn window(&self) -> DashboardWindow {
        DashboardWindow {
            lines: self.lines.clone(),
            event_senders: self.event_senders.clone(),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
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
        let mut lines = self.lines.lock().map_err(|e| e.to_string())?;
        *lines = self.pending.clone();
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
