use crate::activity::ActivityResult;
use crate::config::Config;
use crate::frame::Frame;
use crate::gate::{AnalysisGate, DetectionStatus, GateDecision};
use crate::history::HistoryStore;
use crate::motion::scorer::MotionScorer;
use std::time::Instant;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    #[default]
    Requesting,
    Unavailable,
    Ready,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub camera: CameraState,
    pub gate: AnalysisGate,
    pub motion: MotionScorer,
    pub motion_score: u32,
    pub current_activity: Option<ActivityResult>,
    pub history: HistoryStore,
    pub shutting_down: bool,
}

impl Model {
    pub fn new(config: &Config) -> Self {
        Self {
            camera: CameraState::default(),
            gate: AnalysisGate::new(config.motion_score_trigger, config.cooldown),
            motion: MotionScorer::new(config.motion_threshold),
            motion_score: 0,
            current_activity: None,
            history: HistoryStore::new(config.history_cap),
            shutting_down: false,
        }
    }

    pub fn status(&self) -> DetectionStatus {
        self.gate.status()
    }

    pub fn is_processing(&self) -> bool {
        self.gate.is_processing()
    }
}

#[derive(Debug)]
pub enum Event {
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    Tick { now: Instant, frame: Option<Frame> },
    ForceAnalysis(Instant),
    AnalysisDone(ActivityResult),
    Shutdown,
}

impl Event {
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    StartCamera,
    SubscribeTick,
    SubscribeToDisplayEvents,
    Analyze,
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (
        Model::new(config),
        vec![
            Effect::StartCamera,
            Effect::SubscribeTick,
            Effect::SubscribeToDisplayEvents,
        ],
    )
}

pub fn transition(_config: &Config, mut model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::CameraStartDone(Ok(())) => {
            model.camera = CameraState::Ready;
            (model, vec![])
        }
        // No retry: the dashboard keeps showing the waiting state.
        Event::CameraStartDone(Err(_)) => {
            model.camera = CameraState::Unavailable;
            (model, vec![])
        }

        // Nothing is scored while a classification is running; the previous
        // frame stays as it was.
        Event::Tick { .. } if model.gate.is_processing() => (model, vec![]),
        Event::Tick { frame: None, .. } => (model, vec![]),
        Event::Tick {
            now,
            frame: Some(frame),
        } => {
            let score = model.motion.observe(frame);
            model.motion_score = score;
            match model.gate.evaluate(score, now) {
                GateDecision::Analyze => (model, vec![Effect::Analyze]),
                GateDecision::Busy | GateDecision::Wait => (model, vec![]),
            }
        }

        Event::ForceAnalysis(now) => {
            let source_ready = model.camera == CameraState::Ready;
            match model.gate.force(now, source_ready) {
                GateDecision::Analyze => (model, vec![Effect::Analyze]),
                GateDecision::Busy | GateDecision::Wait => (model, vec![]),
            }
        }

        Event::AnalysisDone(result) => {
            model.history.record(result.clone());
            model.current_activity = Some(result);
            model.gate.complete();
            (model, vec![])
        }

        Event::Shutdown => {
            model.shutting_down = true;
            (model, vec![])
        }
    }
}
