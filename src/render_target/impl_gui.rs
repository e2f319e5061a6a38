use crate::device_display::interface::View;
use crate::geometry::Size;
use crate::render_target::interface::{Color, DrawCommand, Rect, RenderTarget};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Everything the window paints, written by the session thread and read by
/// the UI thread.
#[derive(Default)]
pub struct GuiScene {
    /// Size the media element was laid out at on the last paint.
    pub displayed: Size,
    /// Size the overlay was last drawn for.
    pub surface: Size,
    pub overlay: Vec<DrawCommand>,
    pub media: Option<image::RgbImage>,
    pub media_generation: u64,
    pub view: View,
}

pub type SharedScene = Arc<Mutex<GuiScene>>;

pub struct RenderTargetGui {
    scene: SharedScene,
}

impl RenderTargetGui {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }

    fn with_scene<T>(
        &self,
        f: impl FnOnce(&mut GuiScene) -> T,
    ) -> Result<T, Box<dyn Error + Send + Sync>> {
        let mut scene = self.scene.lock().map_err(|_| "gui scene poisoned")?;
        Ok(f(&mut scene))
    }
}

impl RenderTarget for RenderTargetGui {
    fn displayed_size(&self) -> Size {
        self.with_scene(|s| s.displayed).unwrap_or_default()
    }

    fn resize(&mut self, size: Size) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_scene(|s| s.surface = size)
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_scene(|s| s.overlay.clear())
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        line_width: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_scene(|s| {
            s.overlay.push(DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
            })
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_scene(|s| s.overlay.push(DrawCommand::FillRect { rect, color }))
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
        font_px: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_scene(|s| {
            s.overlay.push(DrawCommand::FillText {
                text: text.to_string(),
                x,
                y,
                color,
                font_px,
            })
        })
    }
}
