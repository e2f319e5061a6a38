use crate::error::CameraError;
use image::RgbImage;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCameraEvent {
    Disconnected,
    Connected,
}

/// A granted live stream. Dropping it without `stop` leaks the device.
pub trait CameraStream: Send {
    /// Native resolution of the stream.
    fn dimensions(&self) -> (u32, u32);
    fn grab(&mut self) -> Result<RgbImage, CameraError>;
    /// Stops every track. Idempotent.
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

pub trait DeviceCamera: Send + Sync {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError>;
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceCameraEvent>;
}
