use crate::device_display::interface::{Controls, DeviceDisplay, View};
use image::RgbImage;
use std::error::Error;

const WIDTH: usize = 48;

pub struct DeviceDisplayConsole {
    last: Option<View>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { last: None }
    }

    fn render_view(&self, view: &View) {
        println!("┌{}┐", "─".repeat(WIDTH));
        println!("│{:<width$}│", fit(&view.status), width = WIDTH);
        println!("│{:<width$}│", fit(&format!("model: {}", view.model)), width = WIDTH);
        if let Some(panel) = &view.panel {
            println!("├{}┤", "─".repeat(WIDTH));
            for entry in &panel.entries {
                let line = format!(
                    "{} {:<24} {:>6.1}%{}",
                    if entry.highlighted { "*" } else { " " },
                    entry.label,
                    entry.confidence * 100.0,
                    if entry.highlighted { "  Highest" } else { "" }
                );
                println!("│{:<width$}│", fit(&line), width = WIDTH);
            }
        }
        println!("├{}┤", "─".repeat(WIDTH));
        println!("│{:<width$}│", fit(&commands_hint(&view.controls)), width = WIDTH);
        println!("└{}┘", "─".repeat(WIDTH));
    }
}

fn fit(text: &str) -> String {
    text.chars().take(WIDTH).collect()
}

fn commands_hint(controls: &Controls) -> String {
    let mut hints = Vec::new();
    if controls.open_camera {
        hints.push("camera");
    }
    if controls.load_file {
        hints.push("load <path>");
    }
    if controls.capture {
        hints.push("capture");
    }
    if controls.start_realtime {
        hints.push("start");
    }
    if controls.stop_realtime {
        hints.push("stop");
    }
    if controls.submit_visible && controls.submit_enabled {
        hints.push("detect");
    }
    if controls.reset {
        hints.push("reset");
    }
    hints.push("model <id>");
    hints.join(" | ")
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last.as_ref() == Some(view) {
            return Ok(());
        }
        self.render_view(view);
        self.last = Some(view.clone());
        Ok(())
    }

    fn show_media(&mut self, media: Option<&RgbImage>) -> Result<(), Box<dyn Error + Send + Sync>> {
        match media {
            Some(image) => println!("[media {}x{}]", image.width(), image.height()),
            None => println!("[media hidden]"),
        }
        Ok(())
    }
}
