use crate::capture_source::encode::{decode, encode_jpeg, mime_for, EncodedImage};
use crate::capture_source::media_source::{MediaKind, MediaSource};
use crate::device_camera::interface::DeviceCamera;
use crate::error::{CameraError, CaptureError};
use crate::geometry::Size;
use crate::library::logger::interface::Logger;
use crate::session::ticket::Ticket;
use image::RgbImage;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

struct Slot {
    ticket: Ticket,
    source: MediaSource,
}

/// One frame pulled from the live stream for the polling loop.
#[derive(Debug, Clone)]
pub struct LiveFrame {
    pub image: EncodedImage,
    pub size: Size,
    pub pixels: RgbImage,
}

/// Sole owner of the active media source. Acquiring a new source always
/// releases the previous one first.
pub struct CaptureSource {
    logger: Arc<dyn Logger + Send + Sync>,
    camera: Arc<dyn DeviceCamera + Send + Sync>,
    jpeg_quality: u8,
    slot: Mutex<Option<Slot>>,
}

impl CaptureSource {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        camera: Arc<dyn DeviceCamera + Send + Sync>,
        jpeg_quality: u8,
    ) -> Self {
        Self {
            logger: logger.with_namespace("capture"),
            camera,
            jpeg_quality,
            slot: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Slot>> {
        // A panic while holding the slot leaves it in a usable state.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn replace(&self, slot: &mut Option<Slot>, next: Slot) {
        self.release_locked(slot);
        let _ = self
            .logger
            .info(&format!("holding {:?} ({})", next.source.kind(), next.ticket));
        *slot = Some(next);
    }

    pub fn request_camera(&self, ticket: Ticket) -> Result<Size, CameraError> {
        let stream = self.camera.open()?;
        let (width, height) = stream.dimensions();
        let mut slot = self.slot();
        self.replace(
            &mut slot,
            Slot {
                ticket,
                source: MediaSource::LiveCamera { stream },
            },
        );
        Ok(Size::from_pixels(width, height))
    }

    /// Grabs one frame at native resolution and stops the camera.
    pub fn capture_snapshot(&self, ticket: Ticket) -> Result<Size, CaptureError> {
        let mut slot = self.slot();
        let frame = match slot.as_mut().map(|s| &mut s.source) {
            Some(MediaSource::LiveCamera { stream }) => stream.grab()?,
            _ => return Err(CaptureError::NoCamera),
        };
        let blob = encode_jpeg(&frame, self.jpeg_quality, "capture.jpg")?;
        let natural = frame.dimensions();
        self.replace(
            &mut slot,
            Slot {
                ticket,
                source: MediaSource::CapturedStill {
                    blob,
                    natural,
                    pixels: frame,
                },
            },
        );
        Ok(Size::from_pixels(natural.0, natural.1))
    }

    pub fn load_file(&self, ticket: Ticket, path: &Path) -> Result<Size, CaptureError> {
        let bytes = std::fs::read(path).map_err(|e| CaptureError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image.jpg".to_string());
        self.load_bytes(ticket, bytes, &filename)
    }

    pub fn load_bytes(&self, ticket: Ticket, bytes: Vec<u8>, filename: &str) -> Result<Size, CaptureError> {
        let (pixels, natural) = decode(&bytes)?;
        let blob = EncodedImage {
            bytes,
            filename: filename.to_string(),
            mime: mime_for(filename),
        };
        let mut slot = self.slot();
        self.replace(
            &mut slot,
            Slot {
                ticket,
                source: MediaSource::FileImage {
                    blob,
                    natural,
                    pixels,
                },
            },
        );
        Ok(Size::from_pixels(natural.0, natural.1))
    }

    /// Non-destructive frame for real-time detection.
    pub fn grab_live_frame(&self) -> Result<LiveFrame, CaptureError> {
        let mut slot = self.slot();
        let pixels = match slot.as_mut().map(|s| &mut s.source) {
            Some(MediaSource::LiveCamera { stream }) if stream.is_live() => stream.grab()?,
            _ => return Err(CameraError::StreamEnded.into()),
        };
        drop(slot);
        let image = encode_jpeg(&pixels, self.jpeg_quality, "frame.jpg")?;
        Ok(LiveFrame {
            image,
            size: Size::from_pixels(pixels.width(), pixels.height()),
            pixels,
        })
    }

    pub fn still_image(&self) -> Option<EncodedImage> {
        self.slot()
            .as_ref()
            .and_then(|s| s.source.blob().cloned())
    }

    pub fn preview(&self) -> Option<RgbImage> {
        self.slot()
            .as_ref()
            .and_then(|s| s.source.pixels().cloned())
    }

    pub fn kind(&self) -> Option<MediaKind> {
        self.slot().as_ref().map(|s| s.source.kind())
    }

    pub fn ticket(&self) -> Option<Ticket> {
        self.slot().as_ref().map(|s| s.ticket)
    }

    pub fn natural_size(&self) -> Option<Size> {
        self.slot().as_ref().map(|s| s.source.natural_size())
    }

    /// Stops any stream and drops blobs. Idempotent.
    pub fn release(&self) {
        let mut slot = self.slot();
        self.release_locked(&mut slot);
    }

    /// Releases only the source created by `ticket`.
    pub fn release_if(&self, ticket: Ticket) -> bool {
        let mut slot = self.slot();
        if slot.as_ref().map(|s| s.ticket) != Some(ticket) {
            return false;
        }
        self.release_locked(&mut slot);
        true
    }

    fn release_locked(&self, slot: &mut Option<Slot>) {
        if let Some(mut previous) = slot.take() {
            previous.source.release();
            let _ = self.logger.info(&format!(
                "released {:?} ({})",
                previous.source.kind(),
                previous.ticket
            ));
        }
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        self.release();
    }
}
