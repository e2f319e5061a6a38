use super::main::Session;
use crate::config::Config;
use crate::device_display::interface::{Controls, View};
use crate::session::core::{Model, State};
use std::error::Error;

/// What the user can see and reach for a given model.
pub fn view(config: &Config, model: &Model) -> View {
    let busy = model.pending.is_some();
    let mut controls = Controls {
        reset: true,
        loading: busy,
        ..Default::default()
    };

    match &model.state {
        State::Idle => {
            controls.open_camera = !busy;
            controls.load_file = !busy;
            controls.reset = busy;
        }
        State::CameraReady { .. } => {
            controls.capture = !busy;
            controls.start_realtime = !busy;
            controls.load_file = !busy;
        }
        State::StillReady { .. } => {
            controls.open_camera = !busy;
            controls.load_file = !busy;
            controls.submit_visible = true;
            controls.submit_enabled = !busy;
        }
        State::RealTimeRunning { .. } => {
            controls.stop_realtime = true;
        }
        State::Detecting { .. } => {
            controls.submit_visible = true;
            controls.submit_enabled = false;
            controls.loading = true;
        }
    }

    View {
        status: model.status.clone(),
        panel: model.panel.clone(),
        controls,
        model: model.model_id.clone(),
        models: config.models.clone(),
    }
}

impl Session {
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn Error + Send + Sync>> {
        let view = view(&self.config, model);
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "device display poisoned")?;
        device_display.show(&view)
    }
}
