use crate::activity::ActivityPayload;
use crate::activity_classifier::interface::{ActivityClassifier, ClassificationRequest};
use crate::config::ClassifierConfig;
use crate::error::AnalysisError;
use crate::library::logger::interface::Logger;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Classifies frames with a Gemini vision model over the REST API.
pub struct ActivityClassifierGemini {
    client: Client,
    config: ClassifierConfig,
    system_instruction: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ActivityClassifierGemini {
    pub fn new(
        config: ClassifierConfig,
        system_instruction: String,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, AnalysisError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            config,
            system_instruction,
            logger: logger.with_namespace("classifier").with_namespace("gemini"),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

pub fn request_body(system_instruction: &str, request: &ClassificationRequest) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": system_instruction }]
        },
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": "image/jpeg",
                        "data": request.image_base64,
                    }
                },
                { "text": request.prompt }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "activity": { "type": "STRING" },
                    "confidence": { "type": "NUMBER" },
                    "description": { "type": "STRING" }
                },
                "required": ["activity", "confidence", "description"]
            }
        }
    })
}

/// The model's reply text: every text part of the first candidate, joined.
pub fn response_text(body: &str) -> Result<String, AnalysisError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(text)
}

pub fn parse_payload(text: &str) -> Result<ActivityPayload, AnalysisError> {
    Ok(serde_json::from_str(text.trim())?)
}

impl ActivityClassifier for ActivityClassifierGemini {
    fn classify(&self, request: &ClassificationRequest) -> Result<ActivityPayload, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingApiKey)?;

        let _ = self
            .logger
            .info(&format!("Requesting classification from {}", self.config.model));

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(&self.system_instruction, request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let text = response_text(&body)?;
        parse_payload(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn request() -> ClassificationRequest {
        ClassificationRequest {
            image_base64: "/9j/AAAA".to_string(),
            prompt: "Identify the human activity in this frame.".to_string(),
        }
    }

    #[test]
    fn test_request_body_carries_image_and_schema() {
        let body = request_body("be terse", &request());

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "/9j/AAAA");
        assert_eq!(parts[1]["text"], "Identify the human activity in this frame.");

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["activity", "confidence", "description"])
        );
        assert_eq!(
            config["responseSchema"]["properties"]["confidence"]["type"],
            "NUMBER"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"activity\":"},{"text":"\"Typing\"}"}]}}]}"#;
        assert_eq!(response_text(body).unwrap(), r#"{"activity":"Typing"}"#);
    }

    #[test]
    fn test_response_without_text_is_empty() {
        for body in [
            r#"{"candidates":[]}"#,
            r#"{}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#,
        ] {
            assert!(matches!(
                response_text(body),
                Err(AnalysisError::EmptyResponse)
            ));
        }
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        assert!(matches!(
            response_text("<html>Bad Gateway</html>"),
            Err(AnalysisError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_payload() {
        let payload =
            parse_payload(r#" {"activity":"Waving","confidence":0.7,"description":"Hand up."} "#)
                .unwrap();
        assert_eq!(payload.activity.as_deref(), Some("Waving"));
        assert_eq!(payload.confidence, Some(0.7));

        assert!(matches!(
            parse_payload("Waving, probably"),
            Err(AnalysisError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_api_key_fails_without_network() {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let classifier = ActivityClassifierGemini::new(
            ClassifierConfig::default(),
            "instruction".to_string(),
            logger,
        )
        .unwrap();
        assert!(matches!(
            classifier.classify(&request()),
            Err(AnalysisError::MissingApiKey)
        ));
    }

    #[test]
    fn test_url_joins_endpoint_and_model() {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let config = ClassifierConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..ClassifierConfig::default()
        };
        let classifier =
            ActivityClassifierGemini::new(config, "instruction".to_string(), logger).unwrap();
        assert_eq!(
            classifier.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
