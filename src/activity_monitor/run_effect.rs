use crate::activity::{timestamp_now, ActivityResult};
use crate::activity_monitor::core::{Effect, Event};
use crate::activity_monitor::main::ActivityMonitor;
use crate::analysis::analyze;
use crate::device_display::interface::DisplayEvent;
use crate::motion::sampler::FrameSampler;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::Instant;

/// Sends `AnalysisDone` exactly once. If the analysis unwinds before
/// finishing, the error result is sent from `drop` so the gate never stays
/// busy.
pub struct AnalysisCompletion {
    event_sender: Sender<Event>,
    timezone: chrono::FixedOffset,
    sent: bool,
}

impl AnalysisCompletion {
    pub fn new(event_sender: Sender<Event>, timezone: chrono::FixedOffset) -> Self {
        Self {
            event_sender,
            timezone,
            sent: false,
        }
    }

    pub fn finish(mut self, result: ActivityResult) {
        self.sent = true;
        let _ = self.event_sender.send(Event::AnalysisDone(result));
    }
}

impl Drop for AnalysisCompletion {
    fn drop(&mut self) {
        if !self.sent {
            let failure = ActivityResult::failure(timestamp_now(&self.timezone));
            let _ = self.event_sender.send(Event::AnalysisDone(failure));
        }
    }
}

#[derive(Clone)]
pub struct RunEffect {
    activity_monitor: ActivityMonitor,
    sampler: FrameSampler,
}

impl RunEffect {
    pub fn new(activity_monitor: ActivityMonitor) -> Self {
        let sampler = FrameSampler::new(
            activity_monitor.config.analysis_width,
            activity_monitor.config.analysis_height,
            activity_monitor.logger.clone(),
        );
        Self {
            activity_monitor,
            sampler,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let monitor = &self.activity_monitor;
        let _ = monitor.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::StartCamera => {
                let started = monitor.device_camera.start();
                if let Err(e) = &started {
                    let _ = monitor.logger.error(&format!("Camera unavailable: {}", e));
                }
                let _ = monitor.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(monitor.config.tick_rate);
                if monitor.is_stopped() {
                    break;
                }
                let frame = self.sampler.sample(monitor.device_camera.as_ref());
                let tick = Event::Tick {
                    now: Instant::now(),
                    frame,
                };
                if monitor.event_sender.send(tick).is_err() {
                    break;
                }
            },
            Effect::SubscribeToDisplayEvents => {
                let events = match monitor.device_display.lock() {
                    Ok(display) => display.events(),
                    Err(_) => return,
                };
                while !monitor.is_stopped() {
                    match events.recv_timeout(monitor.config.tick_rate) {
                        Ok(DisplayEvent::ForceAnalysis) => monitor.force_analysis(),
                        Ok(DisplayEvent::Quit) => monitor.shutdown(),
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            }
            Effect::Analyze => {
                let completion = AnalysisCompletion::new(
                    monitor.event_sender.clone(),
                    monitor.config.logger_timezone,
                );
                let result = analyze(
                    monitor.device_camera.as_ref(),
                    monitor.activity_classifier.as_ref(),
                    &monitor.config,
                    monitor.logger.as_ref(),
                );
                completion.finish(result);
            }
        }
    }
}
