use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("source dimensions must be positive, got {width}x{height}")]
    DegenerateSource { width: f32, height: f32 },
    #[error("display dimensions must be finite, got {width}x{height}")]
    NonFiniteDisplay { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera stream ended")]
    StreamEnded,
    #[error("failed to read frame: {0}")]
    Frame(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("no live camera to capture from")]
    NoCamera,
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("failed to decode detection response: {0}")]
    Decode(String),
    #[error("Please select an image first.")]
    NoImage,
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("media element is not laid out yet")]
    NotLaidOut,
    #[error("render target failed: {0}")]
    Target(Box<dyn std::error::Error + Send + Sync>),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for OverlayError {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        OverlayError::Target(e)
    }
}
