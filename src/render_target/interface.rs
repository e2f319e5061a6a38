use crate::geometry::Size;
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const SUCCESS: Color = Color::rgb(0x28, 0xa7, 0x45);
    pub const PRIMARY: Color = Color::rgb(0x00, 0x7b, 0xff);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One primitive issued against a render target.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Size),
    Clear,
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        color: Color,
        font_px: f32,
    },
}

/// 2D drawing surface laid over the displayed image or video.
pub trait RenderTarget: Send {
    /// Current on-screen size of the media element the surface covers.
    /// Layout may change between frames, so callers read it per draw.
    fn displayed_size(&self) -> Size;

    fn resize(&mut self, size: Size) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        line_width: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
        font_px: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn measure_text(&self, text: &str, font_px: f32) -> f32 {
        monospace_width(text, font_px)
    }
}

/// Advance width of a monospace face is about 0.6 em.
pub fn monospace_width(text: &str, font_px: f32) -> f32 {
    text.chars().count() as f32 * font_px * 0.6
}
