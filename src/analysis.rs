use crate::activity::{timestamp_now, ActivityResult};
use crate::activity_classifier::interface::{ActivityClassifier, ClassificationRequest};
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::error::AnalysisError;
use crate::library::logger::interface::Logger;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

pub fn encode_jpeg_data_uri(image: &DynamicImage, quality: u8) -> Result<String, AnalysisError> {
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        encoder.encode_image(&image.to_rgb8())?;
    }
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&buffer)))
}

/// Drops a leading `data:<type>;base64,` header if there is one.
pub fn strip_data_uri_prefix(payload: &str) -> &str {
    payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .unwrap_or(payload)
}

fn classify_live_frame(
    camera: &dyn DeviceCamera,
    classifier: &dyn ActivityClassifier,
    config: &Config,
) -> Result<ActivityResult, AnalysisError> {
    let frame = camera
        .capture_frame()
        .map_err(|e| AnalysisError::Capture(e.to_string()))?
        .ok_or(AnalysisError::NoFrame)?;

    let data_uri = encode_jpeg_data_uri(&frame, config.jpeg_quality)?;

    let payload = classifier.classify(&ClassificationRequest {
        image_base64: strip_data_uri_prefix(&data_uri).to_string(),
        prompt: config.analysis_prompt.clone(),
    })?;

    Ok(payload.fill_defaults(timestamp_now(&config.logger_timezone)))
}

/// Captures the live frame and classifies it. Any failure comes back as the
/// error result rather than an `Err`.
pub fn analyze(
    camera: &dyn DeviceCamera,
    classifier: &dyn ActivityClassifier,
    config: &Config,
    logger: &dyn Logger,
) -> ActivityResult {
    match classify_live_frame(camera, classifier, config) {
        Ok(result) => {
            let _ = logger.info(&format!(
                "Classified as {} ({:.0}%)",
                result.activity,
                result.confidence * 100.0
            ));
            result
        }
        Err(e) => {
            let _ = logger.error(&format!("Analysis failed: {}", e));
            ActivityResult::failure(timestamp_now(&config.logger_timezone))
        }
    }
}
