//! JSON and multipart shapes of the `/detect` endpoint.

use crate::capture_source::encode::EncodedImage;
use crate::detection::{Detection, DetectionResult};
use crate::error::DetectError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[serde(default)]
    detections: Option<Vec<Detection>>,
    #[serde(default)]
    highest_confidence_detection: Option<Detection>,
    #[serde(default)]
    model_used: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub fn decode_success(body: &str) -> Result<DetectionResult, DetectError> {
    let parsed: SuccessBody =
        serde_json::from_str(body).map_err(|e| DetectError::Decode(e.to_string()))?;

    let detections = parsed.detections.unwrap_or_default();
    for detection in detections.iter().chain(parsed.highest_confidence_detection.iter()) {
        if !detection.is_valid() {
            return Err(DetectError::Decode(format!(
                "invalid detection '{}' with box {:?} and confidence {}",
                detection.label, detection.bbox, detection.confidence
            )));
        }
    }

    Ok(DetectionResult {
        detections,
        primary: parsed.highest_confidence_detection,
        model_used: parsed.model_used,
    })
}

/// Prefers the server's `{ "error": ... }` message, else reports the status.
pub fn decode_error(status: u16, body: &str) -> DetectError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Server responded with status: {}", status));
    DetectError::Server { status, message }
}

pub fn multipart_body(boundary: &str, image: &EncodedImage, model: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.bytes.len() + 512);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            image.filename.replace('"', "")
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.mime).as_bytes());
    body.extend_from_slice(&image.bytes);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"model\"\r\n\r\n");
    body.extend_from_slice(model.as_bytes());
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}
