use crate::session::panel::ResultPanel;
use image::RgbImage;
use std::error::Error;

/// Which affordances the user can reach right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub open_camera: bool,
    pub load_file: bool,
    pub capture: bool,
    pub start_realtime: bool,
    pub stop_realtime: bool,
    pub submit_visible: bool,
    pub submit_enabled: bool,
    pub reset: bool,
    pub loading: bool,
}

/// Everything outside the overlay that the user sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub status: String,
    pub panel: Option<ResultPanel>,
    pub controls: Controls,
    pub model: String,
    pub models: Vec<String>,
}

pub trait DeviceDisplay: Send {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace the displayed media. `None` hides it.
    fn show_media(&mut self, media: Option<&RgbImage>) -> Result<(), Box<dyn Error + Send + Sync>>;
}
