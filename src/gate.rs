use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStatus {
    Idle,
    DetectingMotion,
    Analyzing,
    Cooldown,
}

impl DetectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionStatus::Idle => "IDLE",
            DetectionStatus::DetectingMotion => "DETECTING MOTION",
            DetectionStatus::Analyzing => "ANALYZING",
            DetectionStatus::Cooldown => "COOLDOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// A classification is still running; the tick was ignored.
    Busy,
    /// Start a classification now.
    Analyze,
    /// Nothing to do this tick.
    Wait,
}

/// Decides when motion justifies a classification. At most one classification
/// is in flight, and starts are at least `cooldown` apart.
#[derive(Debug, Clone)]
pub struct AnalysisGate {
    trigger: u32,
    cooldown: Duration,
    status: DetectionStatus,
    last_analysis: Option<Instant>,
    is_processing: bool,
}

impl AnalysisGate {
    pub fn new(trigger: u32, cooldown: Duration) -> Self {
        Self {
            trigger,
            cooldown,
            status: DetectionStatus::Idle,
            last_analysis: None,
            is_processing: false,
        }
    }

    pub fn status(&self) -> DetectionStatus {
        self.status
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn last_analysis(&self) -> Option<Instant> {
        self.last_analysis
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_analysis {
            Some(last) => now.saturating_duration_since(last) > self.cooldown,
            None => true,
        }
    }

    // The cooldown window is measured from the start of a classification, so a
    // slow reply cannot release a burst of new ones.
    fn begin(&mut self, now: Instant) {
        self.is_processing = true;
        self.last_analysis = Some(now);
        self.status = DetectionStatus::Analyzing;
    }

    pub fn evaluate(&mut self, score: u32, now: Instant) -> GateDecision {
        if self.is_processing {
            return GateDecision::Busy;
        }

        if score > self.trigger && self.cooldown_elapsed(now) {
            self.begin(now);
            GateDecision::Analyze
        } else if score > self.trigger {
            self.status = DetectionStatus::Cooldown;
            GateDecision::Wait
        } else {
            self.status = DetectionStatus::Idle;
            GateDecision::Wait
        }
    }

    /// Manual trigger. Skips the score and cooldown checks, nothing else.
    pub fn force(&mut self, now: Instant, source_ready: bool) -> GateDecision {
        if self.is_processing {
            return GateDecision::Busy;
        }
        if !source_ready {
            return GateDecision::Wait;
        }
        self.begin(now);
        GateDecision::Analyze
    }

    pub fn complete(&mut self) {
        self.is_processing = false;
        self.status = DetectionStatus::DetectingMotion;
    }
}
