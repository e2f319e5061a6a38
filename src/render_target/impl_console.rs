use crate::geometry::Size;
use crate::library::logger::interface::Logger;
use crate::render_target::interface::{Color, Rect, RenderTarget};
use std::error::Error;
use std::sync::Arc;

/// Logs draw primitives instead of painting them. The media element is
/// assumed to be laid out at a fixed size.
pub struct RenderTargetConsole {
    logger: Arc<dyn Logger + Send + Sync>,
    displayed: Size,
    size: Size,
}

impl RenderTargetConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, displayed: Size) -> Self {
        Self {
            logger: logger.with_namespace("overlay"),
            displayed,
            size: Size::default(),
        }
    }
}

impl RenderTarget for RenderTargetConsole {
    fn displayed_size(&self) -> Size {
        self.displayed
    }

    fn resize(&mut self, size: Size) -> Result<(), Box<dyn Error + Send + Sync>> {
        if size != self.size {
            self.logger
                .info(&format!("resize {}x{}", size.width, size.height))?;
        }
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("clear")
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        _line_width: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!(
            "box at ({:.1}, {:.1}) {:.1}x{:.1} {}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color.hex()
        ))
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        _x: f32,
        _y: f32,
        _color: Color,
        _font_px: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info(&format!("label \"{}\"", text))
    }
}
