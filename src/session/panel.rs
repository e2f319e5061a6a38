use crate::detection::{Detection, DetectionResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelEntry {
    pub label: String,
    pub confidence: f32,
    pub highlighted: bool,
}

/// Every detection of a still result, most confident first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPanel {
    pub entries: Vec<PanelEntry>,
}

impl ResultPanel {
    pub fn new(result: &DetectionResult, primary: &Detection, epsilon: f32) -> Self {
        let mut highlighted_one = false;
        let entries = result
            .ranked()
            .into_iter()
            .map(|detection| {
                let highlighted = !highlighted_one && detection.same_as(primary, epsilon);
                highlighted_one |= highlighted;
                PanelEntry {
                    label: detection.label,
                    confidence: detection.confidence,
                    highlighted,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn highlighted(&self) -> Option<&PanelEntry> {
        self.entries.iter().find(|e| e.highlighted)
    }
}
