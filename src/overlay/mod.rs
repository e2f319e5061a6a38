pub mod renderer;


use crate::render_target::interface::Color;

/// Which detections get drawn. Chosen by the caller, never inferred from data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawMode {
    /// Every detection, one color.
    All,
    /// Only the first detection handed in, normally the primary.
    Single,
    /// Up to k detections, ranked colors and `#n` prefixes.
    RankedTopK(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub color: Color,
    pub palette: Vec<Color>,
    pub text_color: Color,
    pub line_width: f32,
    pub font_px: f32,
    pub label_padding: f32,
    pub label_height: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: Color::SUCCESS,
            palette: vec![Color::SUCCESS, Color::PRIMARY],
            text_color: Color::WHITE,
            line_width: 3.0,
            font_px: 16.0,
            label_padding: 8.0,
            label_height: 20.0,
        }
    }
}

impl OverlayStyle {
    /// Past the end of the palette every rank falls back to the first color.
    pub fn rank_color(&self, index: usize) -> Color {
        self.palette
            .get(index)
            .or_else(|| self.palette.first())
            .copied()
            .unwrap_or(self.color)
    }
}

pub fn summary(count: usize) -> String {
    format!("Found {} objects!", count)
}
