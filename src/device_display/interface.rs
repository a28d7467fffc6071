use std::error::Error;
use std::sync::mpsc::Receiver;

/// Requests coming back from whoever is looking at the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    ForceAnalysis,
    Quit,
}

/// A line-oriented dashboard surface.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Blank every line of the pending frame.
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a line of the pending frame (0-based). Text longer than
    /// `chars_per_line` is cut.
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show the pending frame.
    fn present(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn num_lines(&self) -> usize {
        20
    }

    fn chars_per_line(&self) -> usize {
        56
    }

    fn events(&self) -> Receiver<DisplayEvent>;
}

pub fn blank_lines(count: usize) -> Vec<String> {
    vec![String::new(); count]
}

pub fn fit_line(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
