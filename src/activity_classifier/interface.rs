use crate::activity::ActivityPayload;
use crate::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// Bare base64 JPEG, no data-URI prefix.
    pub image_base64: String,
    pub prompt: String,
}

pub trait ActivityClassifier {
    fn classify(&self, request: &ClassificationRequest) -> Result<ActivityPayload, AnalysisError>;
}
