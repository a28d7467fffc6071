use crate::device_camera::interface::{CameraRequest, Facing};
use std::path::PathBuf;
use std::time::Duration;

pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert Computer Vision Human Activity Recognition system.
Analyze the provided image frame from a webcam stream.
Identify the primary human activity taking place.
Be specific but concise (e.g., \"Drinking Water\", \"Talking on Phone\", \"Typing\", \"Waving\", \"Yoga Pose\", \"Standing Still\").
If no person is visible or the image is unclear, return \"No Activity\" or \"Unknown\".
Provide a confidence score between 0 and 1.
Provide a very short 1-sentence description of visual evidence.";

pub const ANALYSIS_PROMPT: &str = "Identify the human activity in this frame.";

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the camera is sampled for motion.
    pub tick_rate: Duration,
    /// Minimum time between the starts of two classifications.
    pub cooldown: Duration,
    /// A pixel counts as changed when |dR| + |dG| + |dB| exceeds this.
    pub motion_threshold: u32,
    /// Changed-pixel count above which a classification is wanted.
    pub motion_score_trigger: u32,
    pub history_cap: usize,
    pub chart_top_n: usize,
    pub analysis_width: u32,
    pub analysis_height: u32,
    pub jpeg_quality: u8,
    pub camera: CameraRequest,
    pub camera_dir: Option<PathBuf>,
    pub display: DisplayKind,
    pub logger_timezone: chrono::FixedOffset,
    pub system_instruction: String,
    pub analysis_prompt: String,
    pub classifier: ClassifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(200),
            cooldown: Duration::from_millis(2000),
            motion_threshold: 25,
            motion_score_trigger: 500,
            history_cap: 100,
            chart_top_n: 8,
            analysis_width: 64,
            analysis_height: 48,
            jpeg_quality: 80,
            camera: CameraRequest {
                ideal_width: 640,
                ideal_height: 480,
                facing: Facing::User,
            },
            camera_dir: None,
            display: DisplayKind::Console,
            logger_timezone: local_offset(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            analysis_prompt: ANALYSIS_PROMPT.to_string(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// What the dashboard names as the model in use.
    pub fn classifier_label(&self) -> &str {
        match self.classifier.api_key {
            Some(_) => &self.classifier.model,
            None => "offline demo",
        }
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        self.classifier.api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));

        if let Some(model) = non_empty("ACTIVITY_MONITOR_MODEL") {
            self.classifier.model = model;
        }

        self.camera_dir = non_empty("ACTIVITY_MONITOR_CAMERA_DIR").map(PathBuf::from);

        if let Some(facing) = non_empty("ACTIVITY_MONITOR_CAMERA_FACING") {
            self.camera.facing = match facing.to_lowercase().as_str() {
                "environment" | "back" | "rear" => Facing::Environment,
                _ => Facing::User,
            };
        }

        if let Some(display) = non_empty("ACTIVITY_MONITOR_DISPLAY") {
            self.display = match display.to_lowercase().as_str() {
                "gui" => DisplayKind::Gui,
                _ => DisplayKind::Console,
            };
        }

        self
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
