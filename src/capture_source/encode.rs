use crate::error::CaptureError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, RgbImage};

/// An image blob ready for upload.
#[derive(Clone, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: String,
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

pub fn encode_jpeg(frame: &RgbImage, quality: u8, filename: &str) -> Result<EncodedImage, CaptureError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(frame.clone())
        .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)))
        .map_err(|e| CaptureError::Encode(e.to_string()))?;
    Ok(EncodedImage {
        bytes,
        filename: filename.to_string(),
        mime: "image/jpeg".to_string(),
    })
}

/// Decodes a user-supplied blob, returning the pixels and natural size.
pub fn decode(bytes: &[u8]) -> Result<(RgbImage, (u32, u32)), CaptureError> {
    let image = image::load_from_memory(bytes).map_err(|e| CaptureError::Decode(e.to_string()))?;
    let dimensions = image.dimensions();
    if dimensions.0 == 0 || dimensions.1 == 0 {
        return Err(CaptureError::Decode("image has no pixels".to_string()));
    }
    Ok((image.to_rgb8(), dimensions))
}

pub fn mime_for(filename: &str) -> String {
    let lower = filename.to_lowercase();
    if lower.ends_with(".png") {
        "image/png".to_string()
    } else {
        "image/jpeg".to_string()
    }
}
