use crate::device_display::interface::{DeviceDisplay, View};
use crate::device_input::interface::UserCommand;
use crate::geometry::Size;
use crate::render_target::impl_gui::{GuiScene, SharedScene};
use crate::render_target::interface::{Color, DrawCommand};
use eframe::egui;
use image::RgbImage;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MAX_MEDIA_WIDTH: f32 = 640.0;

struct DetectWindow {
    scene: SharedScene,
    commands: Sender<UserCommand>,
    texture: Option<(u64, egui::TextureHandle)>,
    path_input: String,
}

fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

impl DetectWindow {
    fn send(&self, command: UserCommand) {
        let _ = self.commands.send(command);
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, view: &View) {
        let controls = &view.controls;
        ui.horizontal(|ui| {
            if controls.open_camera && ui.button("Use Camera").clicked() {
                self.send(UserCommand::RequestCamera);
            }
            if controls.load_file {
                ui.text_edit_singleline(&mut self.path_input);
                if ui.button("Load Image").clicked() && !self.path_input.trim().is_empty() {
                    self.send(UserCommand::LoadFile(PathBuf::from(self.path_input.trim())));
                }
            }
            if controls.capture && ui.button("Capture Photo").clicked() {
                self.send(UserCommand::CaptureSnapshot);
            }
            if controls.start_realtime && ui.button("Start Real-time Detection").clicked() {
                self.send(UserCommand::StartRealTime);
            }
            if controls.stop_realtime && ui.button("Stop Real-time Detection").clicked() {
                self.send(UserCommand::StopRealTime);
            }
            if controls.submit_visible
                && ui
                    .add_enabled(controls.submit_enabled, egui::Button::new("Detect Objects"))
                    .clicked()
            {
                self.send(UserCommand::Submit);
            }
            if controls.reset && ui.button("Reset").clicked() {
                self.send(UserCommand::Reset);
            }
        });

        let mut selected = view.model.clone();
        egui::ComboBox::from_label("Model")
            .selected_text(selected.clone())
            .show_ui(ui, |ui| {
                for model in &view.models {
                    ui.selectable_value(&mut selected, model.clone(), model.as_str());
                }
            });
        if selected != view.model {
            self.send(UserCommand::SelectModel(selected));
        }
    }

    fn media_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, scene: &mut GuiScene) {
        if scene.media.is_none() {
            scene.displayed = Size::default();
            return;
        }
        let Some(media) = scene.media.as_ref() else {
            return;
        };

        let stale = match &self.texture {
            Some((generation, _)) => *generation != scene.media_generation,
            None => true,
        };
        if stale {
            let color_image = egui::ColorImage::from_rgb(
                [media.width() as usize, media.height() as usize],
                media.as_raw(),
            );
            let handle = ctx.load_texture("media", color_image, egui::TextureOptions::default());
            self.texture = Some((scene.media_generation, handle));
        }

        let natural = egui::vec2(media.width() as f32, media.height() as f32);
        let width = natural.x.min(ui.available_width()).min(MAX_MEDIA_WIDTH);
        let size = egui::vec2(width, width * natural.y / natural.x.max(1.0));
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        scene.displayed = Size::new(rect.width(), rect.height());

        let painter = ui.painter_at(rect);
        if let Some((_, texture)) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if scene.surface.is_empty() {
            return;
        }
        // The overlay was drawn for the surface size; follow later layout changes.
        let stretch = egui::vec2(
            scene.displayed.width / scene.surface.width,
            scene.displayed.height / scene.surface.height,
        );
        let origin = rect.min.to_vec2();
        for command in &scene.overlay {
            match command {
                DrawCommand::StrokeRect {
                    rect: r,
                    color,
                    line_width,
                } => {
                    let area = egui::Rect::from_min_size(
                        egui::pos2(r.x * stretch.x, r.y * stretch.y),
                        egui::vec2(r.width * stretch.x, r.height * stretch.y),
                    )
                    .translate(origin);
                    painter.rect_stroke(area, 0.0, egui::Stroke::new(*line_width, color32(*color)));
                }
                DrawCommand::FillRect { rect: r, color } => {
                    let area = egui::Rect::from_min_size(
                        egui::pos2(r.x * stretch.x, r.y * stretch.y),
                        egui::vec2(r.width * stretch.x, r.height * stretch.y),
                    )
                    .translate(origin);
                    painter.rect_filled(area, 0.0, color32(*color));
                }
                DrawCommand::FillText {
                    text,
                    x,
                    y,
                    color,
                    font_px,
                } => {
                    painter.text(
                        egui::pos2(*x * stretch.x, *y * stretch.y) + origin,
                        egui::Align2::LEFT_TOP,
                        text,
                        egui::FontId::monospace(*font_px),
                        color32(*color),
                    );
                }
                DrawCommand::Resize(_) | DrawCommand::Clear => {}
            }
        }
    }
}

impl eframe::App for DetectWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let scene = self.scene.clone();
        let Ok(mut scene) = scene.lock() else {
            return;
        };
        let view = scene.view.clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls_ui(ui, &view);
            ui.separator();
            self.media_ui(ctx, ui, &mut scene);
            ui.separator();
            if view.controls.loading {
                ui.spinner();
            }
            ui.label(view.status.as_str());

            if let Some(panel) = &view.panel {
                ui.separator();
                for entry in &panel.entries {
                    let text = format!("{}  {:.1}%", entry.label, entry.confidence * 100.0);
                    if entry.highlighted {
                        ui.label(egui::RichText::new(format!("{}  Highest", text)).strong());
                    } else {
                        ui.label(text);
                    }
                }
            }
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct DeviceDisplayGui {
    scene: SharedScene,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            scene: Arc::new(Mutex::new(GuiScene::default())),
        }
    }

    pub fn scene(&self) -> SharedScene {
        self.scene.clone()
    }

    /// Blocks the calling thread until the window closes. Must be the main
    /// thread on most platforms.
    pub fn run_window(
        scene: SharedScene,
        commands: Sender<UserCommand>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 720.0]),
            ..Default::default()
        };

        let window = DetectWindow {
            scene,
            commands: commands.clone(),
            texture: None,
            path_input: String::new(),
        };

        let result = eframe::run_native("Object Detection", options, Box::new(|_cc| Box::new(window)));
        let _ = commands.send(UserCommand::Quit);
        result.map_err(|e| e.to_string().into())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut scene = self.scene.lock().map_err(|_| "gui scene poisoned")?;
        scene.view = view.clone();
        Ok(())
    }

    fn show_media(&mut self, media: Option<&RgbImage>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut scene = self.scene.lock().map_err(|_| "gui scene poisoned")?;
        scene.media = media.cloned();
        scene.media_generation += 1;
        if scene.media.is_none() {
            scene.overlay.clear();
        }
        Ok(())
    }
}
