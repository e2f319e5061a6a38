use crate::geometry::Size;
use crate::overlay::OverlayStyle;
use chrono::Offset;
use std::time::Duration;

/// How a finished still-image detection is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StillDrawMode {
    /// Only the primary detection.
    Single,
    All,
    RankedTopK(usize),
}

/// Decides the status suffix after a still detection: either some detection
/// cleared the threshold or the server fell back to its top N.
#[derive(Debug, Clone, PartialEq)]
pub struct EmphasisPolicy {
    pub high_confidence_threshold: f32,
    pub fallback_top_n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayBackend {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    /// Answer detections locally with random boxes instead of calling the server.
    pub fake_detector: bool,
    pub fake_detector_latency: Duration,
    pub models: Vec<String>,
    pub default_model: String,
    pub realtime_interval: Duration,
    pub request_timeout: Duration,
    pub jpeg_quality: u8,
    pub still_draw_mode: StillDrawMode,
    pub emphasis: EmphasisPolicy,
    pub highlight_epsilon: f32,
    pub overlay: OverlayStyle,
    pub logger_timezone: chrono::FixedOffset,
    pub camera_resolution: (u32, u32),
    pub display_backend: DisplayBackend,
    pub console_display_size: Size,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:5000/detect".to_string(),
            fake_detector: false,
            fake_detector_latency: Duration::from_millis(150),
            models: vec!["yolo11n.pt".to_string(), "yolo8n.pt".to_string()],
            default_model: "yolo11n.pt".to_string(),
            realtime_interval: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            jpeg_quality: 80,
            still_draw_mode: StillDrawMode::Single,
            emphasis: EmphasisPolicy {
                high_confidence_threshold: 0.80,
                fallback_top_n: 10,
            },
            highlight_epsilon: 0.001,
            overlay: OverlayStyle::default(),
            logger_timezone: mountain_standard_time(),
            camera_resolution: (640, 480),
            display_backend: DisplayBackend::Console,
            console_display_size: Size::new(640.0, 480.0),
        }
    }
}

impl Config {
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DETECT_ENDPOINT") {
            if !url.trim().is_empty() {
                self.endpoint_url = url.trim().to_string();
            }
        }
        if let Ok(model) = std::env::var("DETECT_MODEL") {
            let model = model.trim().to_string();
            if !model.is_empty() {
                if !self.models.contains(&model) {
                    self.models.push(model.clone());
                }
                self.default_model = model;
            }
        }
        if let Ok(fake) = std::env::var("DETECT_FAKE") {
            self.fake_detector = matches!(fake.trim(), "1" | "true" | "yes");
        }
        if let Ok(display) = std::env::var("DETECT_DISPLAY") {
            if display.eq_ignore_ascii_case("gui") {
                self.display_backend = DisplayBackend::Gui;
            }
        }
        self
    }

    pub fn is_known_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}
