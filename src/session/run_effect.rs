use super::main::Session;
use crate::error::{DetectError, OverlayError};
use crate::session::core::{Effect, Event};

/// Effects touching the display, the overlay, the ticker token or the media
/// slot run on the control thread, in order. Everything else may block.
fn runs_inline(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::ReleaseMedia
            | Effect::ReleaseMediaIf { .. }
            | Effect::ShowMedia
            | Effect::ShowFrame { .. }
            | Effect::CancelTicker { .. }
            | Effect::DrawOverlay { .. }
            | Effect::ClearOverlay
    )
}

impl Session {
    pub fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if runs_inline(&effect) {
                self.run_effect(effect);
            } else {
                let self_clone = self.clone();
                std::thread::spawn(move || self_clone.run_effect(effect));
            }
        }
    }

    fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                while let Ok(event) = events.recv() {
                    if !self.send(Event::CameraEvent(event)) {
                        break;
                    }
                }
            }
            Effect::RequestCamera { ticket } => {
                let result = self.capture.request_camera(ticket);
                self.send(Event::CameraRequestDone { ticket, result });
            }
            Effect::LoadFile { ticket, path } => {
                let result = self.capture.load_file(ticket, &path);
                self.send(Event::FileLoadDone { ticket, result });
            }
            Effect::CaptureSnapshot { ticket } => {
                let result = self.capture.capture_snapshot(ticket);
                self.send(Event::SnapshotDone { ticket, result });
            }
            Effect::StartTicker { run, cancel } => loop {
                std::thread::sleep(self.config.realtime_interval);
                if cancel.is_cancelled() || !self.send(Event::RealTimeTick { run }) {
                    let _ = self.logger.info(&format!("ticker for {} stopped", run));
                    break;
                }
            },
            Effect::CancelTicker { cancel } => cancel.cancel(),
            Effect::CaptureLiveFrame { run } => {
                let result = self.capture.grab_live_frame();
                self.send(Event::LiveFrameCaptured { run, result });
            }
            Effect::DetectLive {
                run,
                image,
                natural,
                model,
            } => {
                let result = self.detection_client.detect(&image, &model);
                self.send(Event::LiveDetectDone {
                    run,
                    natural,
                    result,
                });
            }
            Effect::DetectStill { request, model } => {
                let result = match self.capture.still_image() {
                    Some(image) => self.detection_client.detect(&image, &model),
                    None => Err(DetectError::NoImage),
                };
                self.send(Event::StillDetectDone { request, result });
            }
            Effect::ReleaseMedia => self.capture.release(),
            Effect::ReleaseMediaIf { ticket } => {
                if self.capture.release_if(ticket) {
                    let _ = self
                        .logger
                        .info(&format!("released superseded media ({})", ticket));
                } else if let Some(holder) = self.capture.ticket() {
                    let _ = self
                        .logger
                        .info(&format!("kept media from {}, {} already gone", holder, ticket));
                }
            }
            Effect::ShowMedia => {
                if let (Some(kind), Some(natural)) = (self.capture.kind(), self.capture.natural_size()) {
                    let _ = self.logger.info(&format!(
                        "showing {:?} {}x{}",
                        kind, natural.width, natural.height
                    ));
                }
                let preview = self.capture.preview();
                self.show_media(preview.as_ref());
            }
            Effect::ShowFrame { pixels } => self.show_media(Some(&pixels)),
            Effect::DrawOverlay {
                natural,
                detections,
                mode,
            } => {
                let drawn = match self.render_target.lock() {
                    Ok(mut target) => self.overlay.draw(&mut *target, natural, &detections, mode),
                    Err(_) => Err(OverlayError::Target("render target poisoned".into())),
                };
                if let Err(e) = drawn {
                    let _ = self.logger.warn(&format!("overlay not drawn: {}", e));
                }
            }
            Effect::ClearOverlay => {
                let cleared = match self.render_target.lock() {
                    Ok(mut target) => self.overlay.clear(&mut *target),
                    Err(_) => Err(OverlayError::Target("render target poisoned".into())),
                };
                if let Err(e) = cleared {
                    let _ = self.logger.warn(&format!("overlay not cleared: {}", e));
                }
            }
        }
    }

    fn show_media(&self, media: Option<&image::RgbImage>) {
        let shown = match self.device_display.lock() {
            Ok(mut device_display) => device_display.show_media(media),
            Err(_) => Err("device display poisoned".into()),
        };
        if let Err(e) = shown {
            let _ = self.logger.warn(&format!("media not shown: {}", e));
        }
    }
}
