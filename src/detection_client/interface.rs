use crate::capture_source::encode::EncodedImage;
use crate::detection::DetectionResult;
use crate::error::DetectError;

/// One attempt per call. Retrying is the caller's policy.
pub trait DetectionClient: Send + Sync {
    fn detect(&self, image: &EncodedImage, model: &str) -> Result<DetectionResult, DetectError>;
}
