use crate::frame::Frame;

/// Number of pixel positions whose summed RGB delta exceeds `threshold`.
/// Frames of different sizes are not comparable and score 0.
pub fn motion_score(current: &Frame, previous: &Frame, threshold: u32) -> u32 {
    if !current.same_dimensions(previous) {
        return 0;
    }

    current
        .pixels()
        .zip(previous.pixels())
        .filter(|(a, b)| {
            let delta = a.0[0].abs_diff(b.0[0]) as u32
                + a.0[1].abs_diff(b.0[1]) as u32
                + a.0[2].abs_diff(b.0[2]) as u32;
            delta > threshold
        })
        .count() as u32
}

/// Scores each sampled frame against the one before it. Holds exactly one
/// previous frame.
#[derive(Debug, Clone)]
pub struct MotionScorer {
    threshold: u32,
    previous: Option<Frame>,
}

impl MotionScorer {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            previous: None,
        }
    }

    pub fn observe(&mut self, frame: Frame) -> u32 {
        let score = match &self.previous {
            Some(previous) => motion_score(&frame, previous, self.threshold),
            None => 0,
        };
        self.previous = Some(frame);
        score
    }

    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }
}
