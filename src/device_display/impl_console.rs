use crate::device_display::interface::{blank_lines, fit_line, DeviceDisplay, DisplayEvent};
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};

pub struct DeviceDisplayConsole {
    pending: Vec<String>,
    shown: Vec<String>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            shown: Vec::new(),
        }
    }

    fn render_display(&self) {
        let width = self.chars_per_line();
        println!("┌{}┐", "─".repeat(width));
        for line in &self.pending {
            println!("│{:<width$}│", line, width = width);
        }
        println!("└{}┘", "─".repeat(width));
    }
}

pub fn parse_command(input: &str) -> Option<DisplayEvent> {
    match input.trim().to_lowercase().as_str() {
        "f" | "force" => Some(DisplayEvent::ForceAnalysis),
        "q" | "quit" | "exit" => Some(DisplayEvent::Quit),
        _ => None,
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending = blank_lines(self.num_lines());
        self.shown.clear();
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
        // Only repaint on change; ticks arrive five times a second.
        if self.pending == self.shown {
            return Ok(());
        }
        self.render_display();
        self.shown = self.pending.clone();
        Ok(())
    }

    fn events(&self) -> Receiver<DisplayEvent> {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(event) = parse_command(&line) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("f\n"), Some(DisplayEvent::ForceAnalysis));
        assert_eq!(parse_command(" FORCE "), Some(DisplayEvent::ForceAnalysis));
        assert_eq!(parse_command("q"), Some(DisplayEvent::Quit));
        assert_eq!(parse_command("hello"), None);
    }

    #[test]
    fn test_write_line_bounds_and_truncation() {
        let mut display = DeviceDisplayConsole::new();
        display.init().unwrap();
        assert!(display.write_line(display.num_lines(), "x").is_err());

        display.write_line(0, &"#".repeat(200)).unwrap();
        assert_eq!(display.pending[0].chars().count(), display.chars_per_line());
    }

    #[test]
    fn test_present_tracks_shown_frame() {
        let mut display = DeviceDisplayConsole::new();
        display.init().unwrap();
        display.write_line(1, "ANALYZING").unwrap();
        display.present().unwrap();
        assert_eq!(display.shown[1], "ANALYZING");

        display.clear().unwrap();
        assert_eq!(display.shown[1], "ANALYZING");
        assert_eq!(display.pending[1], "");
    }
}
