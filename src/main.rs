use config::{Config, DisplayBackend};
use detection_client::impl_fake::DetectionClientFake;
use detection_client::impl_http::DetectionClientHttp;
use detection_client::interface::DetectionClient;
use device_camera::impl_fake::DeviceCameraFake;
use device_display::{impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui};
use device_input::impl_channel::DeviceInputChannel;
use device_input::impl_console::DeviceInputConsole;
use device_input::interface::DeviceInput;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use render_target::{impl_console::RenderTargetConsole, impl_gui::RenderTargetGui};
use session::main::Session;
use std::sync::{Arc, Mutex};

mod capture_source;
mod config;
mod detection;
mod detection_client;
mod device_camera;
mod device_display;
mod device_input;
mod error;
mod geometry;
mod library;
mod overlay;
mod render_target;
mod session;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default().with_env_overrides();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let (width, height) = config.camera_resolution;
    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone(), width, height));

    let detection_client: Arc<dyn DetectionClient + Send + Sync> = if config.fake_detector {
        let _ = logger.info(&format!(
            "detecting with {} via random fake",
            config.default_model
        ));
        Arc::new(
            DetectionClientFake::new(logger.clone()).with_latency(config.fake_detector_latency),
        )
    } else {
        let _ = logger.info(&format!(
            "detecting with {} via {}",
            config.default_model, config.endpoint_url
        ));
        Arc::new(DetectionClientHttp::new(
            logger.clone(),
            &config.endpoint_url,
            config.request_timeout,
        ))
    };

    match config.display_backend {
        DisplayBackend::Console => {
            let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new()));
            let render_target = Arc::new(Mutex::new(RenderTargetConsole::new(
                logger.clone(),
                config.console_display_size,
            )));
            let device_input = DeviceInputConsole::new(logger.clone());

            let session = Session::new(
                config,
                logger,
                device_camera,
                detection_client,
                device_display,
                render_target,
            );

            session.run(device_input.events())
        }
        DisplayBackend::Gui => {
            let device_display = DeviceDisplayGui::new();
            let scene = device_display.scene();
            let render_target = Arc::new(Mutex::new(RenderTargetGui::new(scene.clone())));
            let device_input = DeviceInputChannel::new();

            let session = Session::new(
                config,
                logger,
                device_camera,
                detection_client,
                Arc::new(Mutex::new(device_display)),
                render_target,
            );

            let commands = device_input.events();
            let worker = std::thread::spawn(move || session.run(commands));

            // The window owns the main thread until it closes.
            DeviceDisplayGui::run_window(scene, device_input.sender())?;

            worker.join().map_err(|_| "session thread panicked")?
        }
    }
}
