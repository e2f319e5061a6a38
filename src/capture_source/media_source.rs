use crate::capture_source::encode::EncodedImage;
use crate::device_camera::interface::CameraStream;
use crate::geometry::Size;
use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    FileImage,
    CapturedStill,
    LiveCamera,
}

pub enum MediaSource {
    FileImage {
        blob: EncodedImage,
        natural: (u32, u32),
        pixels: RgbImage,
    },
    CapturedStill {
        blob: EncodedImage,
        natural: (u32, u32),
        pixels: RgbImage,
    },
    LiveCamera {
        stream: Box<dyn CameraStream>,
    },
}

impl MediaSource {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaSource::FileImage { .. } => MediaKind::FileImage,
            MediaSource::CapturedStill { .. } => MediaKind::CapturedStill,
            MediaSource::LiveCamera { .. } => MediaKind::LiveCamera,
        }
    }

    pub fn natural_size(&self) -> Size {
        let (width, height) = match self {
            MediaSource::FileImage { natural, .. } | MediaSource::CapturedStill { natural, .. } => {
                *natural
            }
            MediaSource::LiveCamera { stream } => stream.dimensions(),
        };
        Size::from_pixels(width, height)
    }

    pub fn blob(&self) -> Option<&EncodedImage> {
        match self {
            MediaSource::FileImage { blob, .. } | MediaSource::CapturedStill { blob, .. } => {
                Some(blob)
            }
            MediaSource::LiveCamera { .. } => None,
        }
    }

    pub fn pixels(&self) -> Option<&RgbImage> {
        match self {
            MediaSource::FileImage { pixels, .. } | MediaSource::CapturedStill { pixels, .. } => {
                Some(pixels)
            }
            MediaSource::LiveCamera { .. } => None,
        }
    }

    /// Stops camera tracks. Blobs are dropped with the value.
    pub fn release(&mut self) {
        if let MediaSource::LiveCamera { stream } = self {
            stream.stop();
        }
    }
}
