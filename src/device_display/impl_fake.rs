use crate::device_display::interface::{DeviceDisplay, View};
use image::RgbImage;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Recorded {
    views: Vec<View>,
    media: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceDisplayFake {
    recorded: Arc<Mutex<Recorded>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_view(&self) -> Option<View> {
        self.recorded
            .lock()
            .ok()
            .and_then(|r| r.views.last().cloned())
    }

    pub fn media_dimensions(&self) -> Option<(u32, u32)> {
        self.recorded.lock().ok().and_then(|r| r.media)
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut recorded = self.recorded.lock().map_err(|_| "fake display poisoned")?;
        recorded.views.push(view.clone());
        Ok(())
    }

    fn show_media(&mut self, media: Option<&RgbImage>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut recorded = self.recorded.lock().map_err(|_| "fake display poisoned")?;
        recorded.media = media.map(|m| m.dimensions());
        Ok(())
    }
}
