use crate::capture_source::encode::EncodedImage;
use crate::detection::DetectionResult;
use crate::detection_client::interface::DetectionClient;
use crate::detection_client::wire::{decode_error, decode_success, multipart_body};
use crate::error::DetectError;
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Duration;

pub struct DetectionClientHttp {
    logger: Arc<dyn Logger + Send + Sync>,
    agent: ureq::Agent,
    endpoint: String,
}

impl DetectionClientHttp {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, endpoint: &str, timeout: Duration) -> Self {
        Self {
            logger: logger.with_namespace("detect").with_namespace("http"),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl DetectionClient for DetectionClientHttp {
    fn detect(&self, image: &EncodedImage, model: &str) -> Result<DetectionResult, DetectError> {
        let boundary = format!("----snapshot-detect-{:016x}", rand::random::<u64>());
        let body = multipart_body(&boundary, image, model);
        let _ = self.logger.info(&format!(
            "POST {} model={} image={} ({} bytes)",
            self.endpoint,
            model,
            image.filename,
            image.bytes.len()
        ));

        let response = self
            .agent
            .post(&self.endpoint)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", boundary),
            )
            .send_bytes(&body);

        match response {
            Ok(response) => {
                let text = response
                    .into_string()
                    .map_err(|e| DetectError::Network(e.to_string()))?;
                let result = decode_success(&text)?;
                let _ = self.logger.info(&format!(
                    "{} detections from {}",
                    result.detections.len(),
                    result.model_used.as_deref().unwrap_or(model)
                ));
                Ok(result)
            }
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                let error = decode_error(status, &text);
                let _ = self.logger.warn(&format!("status {}: {}", status, error));
                Err(error)
            }
            Err(ureq::Error::Transport(transport)) => {
                let _ = self.logger.warn(&format!("transport: {}", transport));
                Err(DetectError::Network(transport.to_string()))
            }
        }
    }
}
