use crate::capture_source::main::CaptureSource;
use crate::config::Config;
use crate::detection_client::interface::DetectionClient;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::UserCommand;
use crate::library::logger::interface::Logger;
use crate::overlay::renderer::OverlayRenderer;
use crate::render_target::interface::RenderTarget;
use crate::session::core::{init, transition, Event, Model};
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Owns every collaborator the state machine talks to. The model itself is
/// threaded through `process` by whoever drives the loop.
#[derive(Clone)]
pub struct Session {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub capture: Arc<CaptureSource>,
    pub detection_client: Arc<dyn DetectionClient + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send>>,
    pub render_target: Arc<Mutex<dyn RenderTarget + Send>>,
    pub overlay: OverlayRenderer,
    event_sender: Sender<Event>,
    event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl Session {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        detection_client: Arc<dyn DetectionClient + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send>>,
        render_target: Arc<Mutex<dyn RenderTarget + Send>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let capture = Arc::new(CaptureSource::new(
            logger.clone(),
            device_camera.clone(),
            config.jpeg_quality,
        ));
        let overlay = OverlayRenderer::new(config.overlay.clone());

        Self {
            logger: logger.with_namespace("session"),
            config,
            device_camera,
            capture,
            detection_client,
            device_display,
            render_target,
            overlay,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    /// Returns false once nobody is listening.
    pub(super) fn send(&self, event: Event) -> bool {
        self.event_sender.send(event).is_ok()
    }

    pub fn start(&self) -> Model {
        let (model, effects) = init(&self.config);
        if let Err(e) = self.render(&model) {
            let _ = self.logger.warn(&format!("render failed: {}", e));
        }
        self.execute_effects(effects);
        model
    }

    pub fn process(&self, model: Model, event: Event) -> Model {
        let _ = self
            .logger
            .info(&format!("event: {}", event.to_display_string()));

        let (model, effects) = transition(&self.config, model, event);

        let _ = self.logger.info(&format!(
            "state: {:?}, pending: {:?}, status: {:?}",
            model.state, model.pending, model.status
        ));

        if let Err(e) = self.render(&model) {
            let _ = self.logger.warn(&format!("render failed: {}", e));
        }
        self.execute_effects(effects);
        model
    }

    pub fn next_event(&self, timeout: Duration) -> Option<Event> {
        let receiver = self.event_receiver.lock().ok()?;
        receiver.recv_timeout(timeout).ok()
    }

    fn forward_commands(&self, commands: Receiver<UserCommand>) {
        let sender = self.sender();
        std::thread::spawn(move || {
            for command in commands {
                if sender.send(Event::User(command)).is_err() {
                    break;
                }
            }
        });
    }

    /// Runs until the user quits. Quitting resets first so the camera and
    /// ticker are released.
    pub fn run(&self, commands: Receiver<UserCommand>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.forward_commands(commands);
        let mut model = self.start();

        loop {
            let event = self
                .event_receiver
                .lock()
                .map_err(|_| "event queue poisoned")?
                .recv()?;
            let quit = matches!(event, Event::User(UserCommand::Quit));

            model = self.process(model, event);

            if quit {
                let _ = self.logger.info("quit");
                return Ok(());
            }
        }
    }
}
