use crate::geometry::Size;
use crate::render_target::interface::{Color, DrawCommand, Rect, RenderTarget};
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeSurface {
    displayed: Size,
    commands: Vec<DrawCommand>,
}

/// Records every primitive. Clones share the same recording so a test can
/// keep a handle after giving the target to a session.
#[derive(Debug, Clone, Default)]
pub struct RenderTargetFake {
    surface: Arc<Mutex<FakeSurface>>,
}

impl RenderTargetFake {
    pub fn new(displayed: Size) -> Self {
        Self {
            surface: Arc::new(Mutex::new(FakeSurface {
                displayed,
                ..Default::default()
            })),
        }
    }

    /// Simulates a layout change of the media element.
    pub fn set_displayed_size(&self, size: Size) {
        if let Ok(mut surface) = self.surface.lock() {
            surface.displayed = size;
        }
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.surface
            .lock()
            .map(|s| s.commands.clone())
            .unwrap_or_default()
    }

    pub fn take_commands(&self) -> Vec<DrawCommand> {
        self.surface
            .lock()
            .map(|mut s| std::mem::take(&mut s.commands))
            .unwrap_or_default()
    }

    pub fn stroked_rects(&self) -> Vec<(Rect, Color)> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeRect { rect, color, .. } => Some((rect, color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, command: DrawCommand) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut surface = self
            .surface
            .lock()
            .map_err(|_| "fake render target poisoned")?;
        surface.commands.push(command);
        Ok(())
    }
}

impl RenderTarget for RenderTargetFake {
    fn displayed_size(&self) -> Size {
        self.surface.lock().map(|s| s.displayed).unwrap_or_default()
    }

    fn resize(&mut self, size: Size) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DrawCommand::Resize(size))
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DrawCommand::Clear)
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        line_width: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DrawCommand::FillRect { rect, color })
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
        font_px: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            color,
            font_px,
        })
    }
}
