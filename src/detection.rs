use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: &str, confidence: f32) -> Self {
        Self {
            bbox,
            label: label.to_string(),
            confidence,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.bbox.is_ordered() && (0.0..=1.0).contains(&self.confidence)
    }

    /// `"cat (92.0%)"`
    pub fn caption(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.confidence * 100.0)
    }

    /// Float equality is unsafe for confidences that round-tripped through JSON.
    pub fn same_as(&self, other: &Detection, epsilon: f32) -> bool {
        self.label == other.label && (self.confidence - other.confidence).abs() < epsilon
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionResult {
    /// Server order.
    pub detections: Vec<Detection>,
    /// Server-designated primary, if any.
    pub primary: Option<Detection>,
    pub model_used: Option<String>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Server-designated primary, else the highest-confidence detection.
    pub fn primary_or_highest(&self) -> Option<Detection> {
        self.primary.clone().or_else(|| {
            self.detections
                .iter()
                .max_by(|a, b| by_confidence(a, b))
                .cloned()
        })
    }

    pub fn ranked(&self) -> Vec<Detection> {
        let mut sorted = self.detections.clone();
        sorted.sort_by(|a, b| by_confidence(b, a));
        sorted
    }
}

fn by_confidence(a: &Detection, b: &Detection) -> Ordering {
    a.confidence
        .partial_cmp(&b.confidence)
        .unwrap_or(Ordering::Equal)
}
