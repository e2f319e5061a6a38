use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Corner-form box `(x1, y1, x2, y2)` in source-media pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A box in display-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl MappedBox {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

/// Scale factors from source pixels to display pixels.
pub fn scale(source: Size, display: Size) -> Result<Scale, GeometryError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(source.width) || !valid(source.height) {
        return Err(GeometryError::DegenerateSource {
            width: source.width,
            height: source.height,
        });
    }
    if !display.width.is_finite() || !display.height.is_finite() {
        return Err(GeometryError::NonFiniteDisplay {
            width: display.width,
            height: display.height,
        });
    }
    Ok(Scale {
        x: display.width / source.width,
        y: display.height / source.height,
    })
}

pub fn apply(bbox: &BoundingBox, scale: Scale) -> MappedBox {
    MappedBox {
        x1: bbox.x1 * scale.x,
        y1: bbox.y1 * scale.y,
        x2: bbox.x2 * scale.x,
        y2: bbox.y2 * scale.y,
    }
}

/// Map a source-space box onto a display of a different size. Must be called
/// per frame: video resolution and layout size change independently.
pub fn map_box(bbox: &BoundingBox, source: Size, display: Size) -> Result<MappedBox, GeometryError> {
    Ok(apply(bbox, scale(source, display)?))
}
