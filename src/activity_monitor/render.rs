use crate::activity_monitor::core::{CameraState, Model};
use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::gate::DetectionStatus;
use std::sync::{Arc, Mutex};

const METER_WIDTH: usize = 40;
const METER_FULL_SCALE: u32 = 2000;
const CHART_BAR_WIDTH: usize = 24;
const CHART_LABEL_WIDTH: usize = 20;
const LOG_ENTRIES: usize = 5;

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
}

pub fn status_badge(model: &Model) -> &'static str {
    match model.status() {
        DetectionStatus::Idle if model.motion_score > 0 => "MOTION DETECTED",
        status => status.label(),
    }
}

pub fn motion_meter(score: u32) -> String {
    let filled = (score.min(METER_FULL_SCALE) as usize * METER_WIDTH) / METER_FULL_SCALE as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(METER_WIDTH - filled))
}

fn chart_bar(count: usize, max: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (count * CHART_BAR_WIDTH).div_ceil(max)
    };
    "█".repeat(filled)
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>, config: Config) -> Self {
        Self {
            device_display,
            config,
        }
    }

    pub fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().map_err(|e| e.to_string())?;
        device_display.init()
    }

    pub fn lines(&self, model: &Model) -> Vec<String> {
        let mut lines = Vec::new();

        let system = if model.is_processing() {
            "Processing AI..."
        } else {
            "System Ready"
        };
        lines.push(format!("ACTIVITY MONITOR · {}", system));

        match model.camera {
            CameraState::Requesting => lines.push("Requesting camera...".to_string()),
            CameraState::Unavailable => {
                lines.push("Waiting for camera permissions...".to_string())
            }
            CameraState::Ready => {
                lines.push(format!(
                    "{} · Motion Delta: {}",
                    status_badge(model),
                    model.motion_score
                ));
                lines.push(motion_meter(model.motion_score));
            }
        }
        lines.push(String::new());

        match &model.current_activity {
            Some(current) => {
                lines.push(format!(
                    "Detected: {} ({:.0}%)",
                    current.activity,
                    current.confidence * 100.0
                ));
                lines.push(current.description.clone());
            }
            None => {
                lines.push("Detected: Waiting...".to_string());
                lines.push(
                    "Motion detection active. Waiting for significant movement to analyze..."
                        .to_string(),
                );
            }
        }
        lines.push(String::new());

        lines.push(format!(
            "Total Detections: {} · Model: {}",
            model.history.len(),
            self.config.classifier_label()
        ));
        let frequencies = model.history.aggregate(self.config.chart_top_n);
        if frequencies.is_empty() {
            lines.push("No detectable activity stats yet...".to_string());
        } else {
            let max = frequencies[0].count;
            for frequency in &frequencies {
                let label: String = frequency.label.chars().take(CHART_LABEL_WIDTH).collect();
                lines.push(format!(
                    "{:<width$} {} {}",
                    label,
                    chart_bar(frequency.count, max),
                    frequency.count,
                    width = CHART_LABEL_WIDTH
                ));
            }
        }

        if !model.history.is_empty() {
            lines.push(String::new());
            lines.push("Detection Log".to_string());
            for entry in model.history.entries().take(LOG_ENTRIES) {
                lines.push(format!(
                    "[{}] {}: {}",
                    entry.timestamp, entry.activity, entry.description
                ));
            }
        }

        lines
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().map_err(|e| e.to_string())?;

        device_display.clear()?;

        let num_lines = device_display.num_lines();
        let mut lines = self.lines(model);
        lines.truncate(num_lines.saturating_sub(1));
        for (index, line) in lines.iter().enumerate() {
            device_display.write_line(index, line)?;
        }
        device_display.write_line(num_lines - 1, "[f] force analysis  [q] quit")?;

        device_display.present()
    }
}
