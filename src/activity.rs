use serde::Deserialize;

pub const ERROR_LABEL: &str = "Error";
pub const NO_ACTIVITY_LABEL: &str = "No Activity";
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const FAILURE_DESCRIPTION: &str = "Failed to analyze frame.";
pub const MISSING_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityResult {
    pub activity: String,
    pub confidence: f32,
    pub description: String,
    pub timestamp: String,
}

impl ActivityResult {
    /// Stand-in for a classification that could not be completed.
    pub fn failure(timestamp: String) -> Self {
        Self {
            activity: ERROR_LABEL.to_string(),
            confidence: 0.0,
            description: FAILURE_DESCRIPTION.to_string(),
            timestamp,
        }
    }

    pub fn is_error(&self) -> bool {
        self.activity == ERROR_LABEL
    }
}

/// What the classifier returned, before any field is trusted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActivityPayload {
    pub activity: Option<String>,
    pub confidence: Option<f64>,
    pub description: Option<String>,
}

impl ActivityPayload {
    pub fn fill_defaults(self, timestamp: String) -> ActivityResult {
        let activity = self
            .activity
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        let confidence = self
            .confidence
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 1.0) as f32)
            .unwrap_or(0.0);

        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());

        ActivityResult {
            activity,
            confidence,
            description,
            timestamp,
        }
    }
}

pub fn timestamp_now(timezone: &chrono::FixedOffset) -> String {
    format_timestamp(chrono::Utc::now().with_timezone(timezone))
}

pub fn format_timestamp(time: chrono::DateTime<chrono::FixedOffset>) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_complete_payload_is_kept() {
        let payload = ActivityPayload {
            activity: Some("Typing".to_string()),
            confidence: Some(0.92),
            description: Some("Hands on a keyboard.".to_string()),
        };
        let result = payload.fill_defaults("9:41:00 AM".to_string());
        assert_eq!(result.activity, "Typing");
        assert!((result.confidence - 0.92).abs() < 1e-6);
        assert_eq!(result.description, "Hands on a keyboard.");
        assert_eq!(result.timestamp, "9:41:00 AM");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let result = ActivityPayload::default().fill_defaults("t".to_string());
        assert_eq!(result.activity, UNKNOWN_LABEL);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.description, MISSING_DESCRIPTION);
        assert!(!result.is_error());
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let payload = ActivityPayload {
            activity: Some("  ".to_string()),
            confidence: None,
            description: Some(String::new()),
        };
        let result = payload.fill_defaults("t".to_string());
        assert_eq!(result.activity, UNKNOWN_LABEL);
        assert_eq!(result.description, MISSING_DESCRIPTION);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = ActivityPayload {
            confidence: Some(7.5),
            ..Default::default()
        };
        let low = ActivityPayload {
            confidence: Some(-0.2),
            ..Default::default()
        };
        let nan = ActivityPayload {
            confidence: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(high.fill_defaults("t".to_string()).confidence, 1.0);
        assert_eq!(low.fill_defaults("t".to_string()).confidence, 0.0);
        assert_eq!(nan.fill_defaults("t".to_string()).confidence, 0.0);
    }

    #[test]
    fn test_failure_sentinel() {
        let result = ActivityResult::failure("t".to_string());
        assert!(result.is_error());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.description, FAILURE_DESCRIPTION);
    }

    #[test]
    fn test_payload_parses_with_missing_fields() {
        let payload: ActivityPayload = serde_json::from_str(r#"{"activity":"Waving"}"#).unwrap();
        assert_eq!(payload.activity.as_deref(), Some("Waving"));
        assert_eq!(payload.confidence, None);
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        assert!(serde_json::from_str::<ActivityPayload>(r#"{"confidence":"high"}"#).is_err());
        assert!(serde_json::from_str::<ActivityPayload>(r#"["Typing"]"#).is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let offset = chrono::FixedOffset::east_opt(0).unwrap();
        let time = offset.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap();
        assert_eq!(format_timestamp(time), "3:04:05 PM");
    }
}
