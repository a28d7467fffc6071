use crate::activity::ActivityPayload;
use crate::activity_classifier::interface::{ActivityClassifier, ClassificationRequest};
use crate::error::AnalysisError;
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

const ACTIVITIES: [(&str, &str); 8] = [
    ("Typing", "Hands are moving over a keyboard."),
    ("Drinking Water", "A glass is raised to the mouth."),
    ("Talking on Phone", "A phone is held against the ear."),
    ("Waving", "An open hand is moving side to side."),
    ("Stretching", "Arms are extended above the head."),
    ("Reading", "Eyes are directed at a held book."),
    ("Standing Still", "A person stands upright without moving."),
    ("No Activity", "No person is visible in the frame."),
];

pub struct ActivityClassifierFake {
    latency: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ActivityClassifierFake {
    pub fn new(latency: Duration, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            latency,
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }
}

impl ActivityClassifier for ActivityClassifierFake {
    fn classify(&self, request: &ClassificationRequest) -> Result<ActivityPayload, AnalysisError> {
        let _ = self.logger.info(&format!(
            "Classifying {} bytes of base64 image...",
            request.image_base64.len()
        ));
        std::thread::sleep(self.latency);

        let mut rng = rand::rng();
        let (activity, description) = ACTIVITIES[rng.random_range(0..ACTIVITIES.len())];
        let confidence = rng.random_range(0.55..0.99);

        Ok(ActivityPayload {
            activity: Some(activity.to_string()),
            confidence: Some(confidence),
            description: Some(description.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    #[test]
    fn test_fake_returns_complete_payload() {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let classifier = ActivityClassifierFake::new(Duration::ZERO, logger);
        let payload = classifier
            .classify(&ClassificationRequest {
                image_base64: "AAAA".to_string(),
                prompt: "prompt".to_string(),
            })
            .unwrap();

        let activity = payload.activity.unwrap();
        assert!(ACTIVITIES.iter().any(|(label, _)| *label == activity));
        let confidence = payload.confidence.unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!(payload.description.is_some());
    }
}
