use crate::capture_source::encode::EncodedImage;
use crate::detection::{Detection, DetectionResult};
use crate::detection_client::interface::DetectionClient;
use crate::error::DetectError;
use crate::geometry::BoundingBox;
use crate::library::logger::interface::Logger;
use image::GenericImageView;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const OBJECTS: [&str; 12] = [
    "person", "dog", "cat", "car", "chair", "bicycle", "bottle", "cup", "laptop", "book", "clock",
    "plant",
];

struct Scripted {
    delay: Duration,
    result: Result<DetectionResult, DetectError>,
}

/// Serves scripted replies in order, then random ones after `latency`.
#[derive(Clone)]
pub struct DetectionClientFake {
    logger: Arc<dyn Logger + Send + Sync>,
    latency: Duration,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl DetectionClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("detect").with_namespace("fake"),
            latency: Duration::ZERO,
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[cfg(test)]
    pub fn push(&self, result: Result<DetectionResult, DetectError>) {
        self.push_delayed(Duration::ZERO, result);
    }

    #[cfg(test)]
    pub fn push_delayed(&self, delay: Duration, result: Result<DetectionResult, DetectError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Scripted { delay, result });
        }
    }

    /// Models requested so far, in call order.
    #[cfg(test)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn random(&self, image: &EncodedImage) -> Result<DetectionResult, DetectError> {
        let (width, height) = image::load_from_memory(&image.bytes)
            .map(|i| i.dimensions())
            .unwrap_or((640, 480));
        let mut rng = rand::rng();
        let bad = |e: rand::distr::uniform::Error| DetectError::Decode(e.to_string());

        let count = Uniform::new_inclusive(0usize, 3).map_err(bad)?.sample(&mut rng);
        let index = Uniform::new(0, OBJECTS.len()).map_err(bad)?;
        let confidence = Uniform::new(0.3f32, 1.0).map_err(bad)?;
        let unit = Uniform::new(0.0f32, 1.0).map_err(bad)?;

        let detections = (0..count)
            .map(|_| {
                let x1 = unit.sample(&mut rng) * width as f32 * 0.6;
                let y1 = unit.sample(&mut rng) * height as f32 * 0.6;
                let w = (0.1 + unit.sample(&mut rng) * 0.3) * width as f32;
                let h = (0.1 + unit.sample(&mut rng) * 0.3) * height as f32;
                Detection::new(
                    BoundingBox::new(x1, y1, x1 + w, y1 + h),
                    OBJECTS[index.sample(&mut rng)],
                    confidence.sample(&mut rng),
                )
            })
            .collect();

        Ok(DetectionResult {
            detections,
            primary: None,
            model_used: None,
        })
    }
}

impl DetectionClient for DetectionClientFake {
    fn detect(&self, image: &EncodedImage, model: &str) -> Result<DetectionResult, DetectError> {
        let call = match self.calls.lock() {
            Ok(mut calls) => {
                calls.push(model.to_string());
                calls.len()
            }
            Err(_) => 0,
        };
        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let _ = self.logger.info(&format!(
            "detect #{} {} with {} ({})",
            call,
            image.filename,
            model,
            if scripted.is_some() { "scripted" } else { "random" }
        ));

        let Scripted { delay, result } = match scripted {
            Some(scripted) => scripted,
            None => Scripted {
                delay: self.latency,
                result: self.random(image),
            },
        };
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        result.map(|mut r| {
            r.model_used.get_or_insert_with(|| model.to_string());
            r
        })
    }
}
