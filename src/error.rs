use thiserror::Error;

/// Every way a classification attempt can fail. None of these escape the
/// analysis step; they become the error result instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no live frame to capture")]
    NoFrame,
    #[error("frame capture failed: {0}")]
    Capture(String),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
    #[error("classifier API key is not configured")]
    MissingApiKey,
    #[error("classification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("classifier responded with status {0}")]
    Status(u16),
    #[error("classifier response had no text")]
    EmptyResponse,
    #[error("classifier response was malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
