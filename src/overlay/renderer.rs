use crate::detection::Detection;
use crate::error::OverlayError;
use crate::geometry::{self, Scale, Size};
use crate::overlay::{DrawMode, OverlayStyle};
use crate::render_target::interface::{Color, Rect, RenderTarget};

#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    /// Resizes the target to the media element's current displayed size,
    /// clears it and draws `detections` mapped from `natural` pixels.
    ///
    /// Geometry is validated before the target is touched, so a degenerate
    /// source or a media element with no on-screen size yet produces no draw
    /// calls at all.
    pub fn draw(
        &self,
        target: &mut dyn RenderTarget,
        natural: Size,
        detections: &[Detection],
        mode: DrawMode,
    ) -> Result<(), OverlayError> {
        let displayed = target.displayed_size();
        if displayed.is_empty() {
            return Err(OverlayError::NotLaidOut);
        }
        let scale = geometry::scale(natural, displayed)?;

        target.resize(displayed)?;
        target.clear()?;

        match mode {
            DrawMode::All => {
                for detection in detections {
                    self.draw_one(target, detection, scale, self.style.color, detection.caption())?;
                }
            }
            DrawMode::Single => {
                if let Some(detection) = detections.first() {
                    self.draw_one(target, detection, scale, self.style.color, detection.caption())?;
                }
            }
            DrawMode::RankedTopK(k) => {
                for (index, detection) in detections.iter().take(k).enumerate() {
                    let text = format!("#{} {}", index + 1, detection.caption());
                    self.draw_one(target, detection, scale, self.style.rank_color(index), text)?;
                }
            }
        }
        Ok(())
    }

    pub fn clear(&self, target: &mut dyn RenderTarget) -> Result<(), OverlayError> {
        let displayed = target.displayed_size();
        target.resize(displayed)?;
        target.clear()?;
        Ok(())
    }

    fn draw_one(
        &self,
        target: &mut dyn RenderTarget,
        detection: &Detection,
        scale: Scale,
        color: Color,
        text: String,
    ) -> Result<(), OverlayError> {
        let mapped = geometry::apply(&detection.bbox, scale);
        let style = &self.style;

        target.stroke_rect(
            Rect::new(mapped.x1, mapped.y1, mapped.width(), mapped.height()),
            color,
            style.line_width,
        )?;

        let text_width = target.measure_text(&text, style.font_px);
        target.fill_rect(
            Rect::new(
                mapped.x1,
                mapped.y1,
                text_width + style.label_padding,
                style.label_height,
            ),
            color,
        )?;
        target.fill_text(
            &text,
            mapped.x1 + style.label_padding / 2.0,
            mapped.y1 + 2.0,
            style.text_color,
            style.font_px,
        )?;
        Ok(())
    }
}
