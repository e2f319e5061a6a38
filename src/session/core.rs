use crate::capture_source::encode::EncodedImage;
use crate::capture_source::main::LiveFrame;
use crate::config::{Config, StillDrawMode};
use crate::detection::{Detection, DetectionResult};
use crate::device_camera::interface::DeviceCameraEvent;
use crate::device_input::interface::UserCommand;
use crate::error::{CameraError, CaptureError, DetectError};
use crate::geometry::Size;
use crate::library::cancel_token::CancelToken;
use crate::overlay::{self, DrawMode};
use crate::session::panel::ResultPanel;
use crate::session::ticket::Ticket;
use image::RgbImage;
use std::path::PathBuf;

pub const STATUS_IDLE: &str = "Please select an image or use your camera.";
pub const STATUS_CAMERA_REQUESTED: &str = "Requesting camera access...";
pub const STATUS_CAMERA_READY: &str = "Camera ready. Start real-time detection or capture a photo.";
pub const STATUS_CAMERA_LOST: &str = "Camera disconnected.";
pub const STATUS_LOADING_FILE: &str = "Loading image...";
pub const STATUS_FILE_LOADED: &str = "Image loaded! Ready to detect objects.";
pub const STATUS_CAPTURING: &str = "Capturing photo...";
pub const STATUS_CAPTURED: &str = "Image captured! Ready to detect objects.";
pub const STATUS_SENDING: &str = "Sending image to the server...";
pub const STATUS_NO_OBJECTS: &str = "Server processed the image, but no objects were found.";
pub const STATUS_REALTIME_ACTIVE: &str = "Real-time detection active...";
pub const STATUS_REALTIME_EMPTY: &str = "Real-time detection active... No objects detected";
pub const STATUS_REALTIME_STOPPED: &str = "Real-time detection stopped.";
pub const STATUS_STREAM_ENDED: &str = "Camera stream ended. Real-time detection stopped.";

/// A still image held by the capture source, tagged with the request that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Still {
    pub media: Ticket,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    #[default]
    Idle,
    CameraReady {
        camera: Ticket,
        size: Size,
    },
    StillReady {
        still: Still,
    },
    RealTimeRunning {
        camera: Ticket,
        size: Size,
        run: Ticket,
        cancel: CancelToken,
    },
    Detecting {
        still: Still,
        request: Ticket,
    },
}

/// A media acquisition in flight. While one is pending, other media
/// commands are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Camera(Ticket),
    File(Ticket),
    Snapshot(Ticket),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub state: State,
    pub pending: Option<Pending>,
    pub last_ticket: Ticket,
    pub model_id: String,
    pub status: String,
    pub panel: Option<ResultPanel>,
}

impl Model {
    pub fn new(config: &Config) -> Self {
        Self {
            state: State::Idle,
            pending: None,
            last_ticket: Ticket::default(),
            model_id: config.default_model.clone(),
            status: STATUS_IDLE.to_string(),
            panel: None,
        }
    }

    fn issue(&mut self) -> Ticket {
        self.last_ticket = self.last_ticket.next();
        self.last_ticket
    }
}

#[derive(Debug)]
pub enum Event {
    User(UserCommand),
    CameraEvent(DeviceCameraEvent),
    CameraRequestDone {
        ticket: Ticket,
        result: Result<Size, CameraError>,
    },
    FileLoadDone {
        ticket: Ticket,
        result: Result<Size, CaptureError>,
    },
    SnapshotDone {
        ticket: Ticket,
        result: Result<Size, CaptureError>,
    },
    RealTimeTick {
        run: Ticket,
    },
    LiveFrameCaptured {
        run: Ticket,
        result: Result<LiveFrame, CaptureError>,
    },
    LiveDetectDone {
        run: Ticket,
        natural: Size,
        result: Result<DetectionResult, DetectError>,
    },
    StillDetectDone {
        request: Ticket,
        result: Result<DetectionResult, DetectError>,
    },
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::LiveFrameCaptured {
                run,
                result: Ok(frame),
            } => format!(
                "LiveFrameCaptured {{ run: {}, size: {:?}, image: {:?} }}",
                run, frame.size, frame.image
            ),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToCameraEvents,
    RequestCamera {
        ticket: Ticket,
    },
    LoadFile {
        ticket: Ticket,
        path: PathBuf,
    },
    CaptureSnapshot {
        ticket: Ticket,
    },
    ReleaseMedia,
    ReleaseMediaIf {
        ticket: Ticket,
    },
    /// Show whatever still the capture source holds, or nothing.
    ShowMedia,
    ShowFrame {
        pixels: RgbImage,
    },
    StartTicker {
        run: Ticket,
        cancel: CancelToken,
    },
    CancelTicker {
        cancel: CancelToken,
    },
    CaptureLiveFrame {
        run: Ticket,
    },
    DetectLive {
        run: Ticket,
        image: EncodedImage,
        natural: Size,
        model: String,
    },
    DetectStill {
        request: Ticket,
        model: String,
    },
    DrawOverlay {
        natural: Size,
        detections: Vec<Detection>,
        mode: DrawMode,
    },
    ClearOverlay,
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ShowFrame { pixels } => {
                format!("ShowFrame {{ {}x{} }}", pixels.width(), pixels.height())
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (Model::new(config), vec![Effect::SubscribeToCameraEvents])
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::User(command) => on_command(config, model, command),
        Event::CameraEvent(event) => on_camera_event(model, event),
        Event::CameraRequestDone { ticket, result } => on_camera_granted(model, ticket, result),
        Event::FileLoadDone { ticket, result } => on_still_acquired(
            model,
            Pending::File(ticket),
            result,
            STATUS_FILE_LOADED,
            "Error loading image",
        ),
        Event::SnapshotDone { ticket, result } => on_still_acquired(
            model,
            Pending::Snapshot(ticket),
            result,
            STATUS_CAPTURED,
            "Error capturing image",
        ),
        Event::RealTimeTick { run } => on_tick(model, run),
        Event::LiveFrameCaptured { run, result } => on_live_frame(model, run, result),
        Event::LiveDetectDone {
            run,
            natural,
            result,
        } => on_live_detected(model, run, natural, result),
        Event::StillDetectDone { request, result } => {
            on_still_detected(config, model, request, result)
        }
    }
}

fn on_command(config: &Config, mut model: Model, command: UserCommand) -> (Model, Vec<Effect>) {
    match (model.state.clone(), command) {
        (_, UserCommand::Reset) | (_, UserCommand::Quit) => reset(model),

        (_, UserCommand::SelectModel(id)) => {
            if config.is_known_model(&id) {
                model.model_id = id;
            } else {
                model.status = format!("Unknown model: {}", id);
            }
            (model, vec![])
        }

        _ if model.pending.is_some() => (model, vec![]),

        (State::Idle | State::StillReady { .. }, UserCommand::RequestCamera) => {
            let ticket = model.issue();
            model.pending = Some(Pending::Camera(ticket));
            model.status = STATUS_CAMERA_REQUESTED.to_string();
            (model, vec![Effect::RequestCamera { ticket }])
        }

        (
            State::Idle | State::CameraReady { .. } | State::StillReady { .. },
            UserCommand::LoadFile(path),
        ) => {
            let ticket = model.issue();
            model.pending = Some(Pending::File(ticket));
            model.status = STATUS_LOADING_FILE.to_string();
            (model, vec![Effect::LoadFile { ticket, path }])
        }

        (State::CameraReady { .. }, UserCommand::CaptureSnapshot) => {
            let ticket = model.issue();
            model.pending = Some(Pending::Snapshot(ticket));
            model.status = STATUS_CAPTURING.to_string();
            (model, vec![Effect::CaptureSnapshot { ticket }])
        }

        (State::CameraReady { camera, size }, UserCommand::StartRealTime) => {
            let run = model.issue();
            let cancel = CancelToken::new();
            model.state = State::RealTimeRunning {
                camera,
                size,
                run,
                cancel: cancel.clone(),
            };
            model.status = STATUS_REALTIME_ACTIVE.to_string();
            model.panel = None;
            (
                model,
                vec![Effect::ClearOverlay, Effect::StartTicker { run, cancel }],
            )
        }

        (
            State::RealTimeRunning {
                camera,
                size,
                cancel,
                ..
            },
            UserCommand::StopRealTime,
        ) => stop_realtime(model, camera, size, cancel, STATUS_REALTIME_STOPPED),

        (State::StillReady { still }, UserCommand::Submit) => {
            let request = model.issue();
            model.state = State::Detecting { still, request };
            model.status = STATUS_SENDING.to_string();
            model.panel = None;
            let effect = Effect::DetectStill {
                request,
                model: model.model_id.clone(),
            };
            (model, vec![Effect::ClearOverlay, effect])
        }

        _ => (model, vec![]),
    }
}

fn reset(mut model: Model) -> (Model, Vec<Effect>) {
    let mut effects = vec![];
    if let State::RealTimeRunning { cancel, .. } = &model.state {
        effects.push(Effect::CancelTicker {
            cancel: cancel.clone(),
        });
    }
    effects.extend([Effect::ReleaseMedia, Effect::ClearOverlay, Effect::ShowMedia]);

    model.state = State::Idle;
    model.pending = None;
    model.panel = None;
    model.status = STATUS_IDLE.to_string();
    (model, effects)
}

fn stop_realtime(
    mut model: Model,
    camera: Ticket,
    size: Size,
    cancel: CancelToken,
    status: &str,
) -> (Model, Vec<Effect>) {
    model.state = State::CameraReady { camera, size };
    model.status = status.to_string();
    (
        model,
        vec![Effect::CancelTicker { cancel }, Effect::ClearOverlay],
    )
}

fn on_camera_event(model: Model, event: DeviceCameraEvent) -> (Model, Vec<Effect>) {
    match (model.state.clone(), event) {
        (
            State::RealTimeRunning {
                camera,
                size,
                cancel,
                ..
            },
            DeviceCameraEvent::Disconnected,
        ) => stop_realtime(model, camera, size, cancel, STATUS_CAMERA_LOST),
        (State::CameraReady { .. }, DeviceCameraEvent::Disconnected) => {
            let mut model = model;
            model.status = STATUS_CAMERA_LOST.to_string();
            (model, vec![])
        }
        _ => (model, vec![]),
    }
}

fn on_camera_granted(
    mut model: Model,
    ticket: Ticket,
    result: Result<Size, CameraError>,
) -> (Model, Vec<Effect>) {
    if model.pending != Some(Pending::Camera(ticket)) {
        return (model, release_stale(ticket, result.is_ok()));
    }
    model.pending = None;

    match result {
        Ok(size) => {
            model.state = State::CameraReady {
                camera: ticket,
                size,
            };
            model.status = STATUS_CAMERA_READY.to_string();
            model.panel = None;
            (model, vec![Effect::ClearOverlay, Effect::ShowMedia])
        }
        Err(e) => {
            model.status = format!("Error accessing camera: {}", e);
            (model, vec![])
        }
    }
}

fn on_still_acquired(
    mut model: Model,
    expected: Pending,
    result: Result<Size, CaptureError>,
    status: &str,
    error_prefix: &str,
) -> (Model, Vec<Effect>) {
    let ticket = match expected {
        Pending::Camera(t) | Pending::File(t) | Pending::Snapshot(t) => t,
    };
    if model.pending != Some(expected) {
        return (model, release_stale(ticket, result.is_ok()));
    }
    model.pending = None;

    match result {
        Ok(size) => {
            model.state = State::StillReady {
                still: Still {
                    media: ticket,
                    size,
                },
            };
            model.status = status.to_string();
            model.panel = None;
            (model, vec![Effect::ClearOverlay, Effect::ShowMedia])
        }
        Err(e) => {
            model.status = format!("{}: {}", error_prefix, e);
            (model, vec![])
        }
    }
}

/// A superseded acquisition that succeeded still holds its source.
fn release_stale(ticket: Ticket, acquired: bool) -> Vec<Effect> {
    if acquired {
        vec![Effect::ReleaseMediaIf { ticket }]
    } else {
        vec![]
    }
}

fn on_tick(model: Model, tick: Ticket) -> (Model, Vec<Effect>) {
    match model.state {
        State::RealTimeRunning { run, .. } if run == tick => {
            (model, vec![Effect::CaptureLiveFrame { run }])
        }
        _ => (model, vec![]),
    }
}

fn on_live_frame(
    mut model: Model,
    run: Ticket,
    result: Result<LiveFrame, CaptureError>,
) -> (Model, Vec<Effect>) {
    let State::RealTimeRunning {
        camera,
        size,
        run: current,
        cancel,
    } = model.state.clone()
    else {
        return (model, vec![]);
    };
    if current != run {
        return (model, vec![]);
    }

    match result {
        Ok(frame) => {
            let detect = Effect::DetectLive {
                run,
                image: frame.image,
                natural: frame.size,
                model: model.model_id.clone(),
            };
            (
                model,
                vec![
                    Effect::ShowFrame {
                        pixels: frame.pixels,
                    },
                    detect,
                ],
            )
        }
        Err(CaptureError::Camera(CameraError::StreamEnded)) => {
            stop_realtime(model, camera, size, cancel, STATUS_STREAM_ENDED)
        }
        Err(e) => {
            model.status = format!("Real-time detection error: {}", e);
            (model, vec![])
        }
    }
}

/// Accepted only if the same run is still active when the response lands.
/// Whichever response arrives last is what stays drawn.
fn on_live_detected(
    mut model: Model,
    run: Ticket,
    natural: Size,
    result: Result<DetectionResult, DetectError>,
) -> (Model, Vec<Effect>) {
    let active = matches!(model.state, State::RealTimeRunning { run: current, .. } if current == run);
    if !active {
        return (model, vec![]);
    }

    match result {
        Ok(result) => {
            model.status = if result.is_empty() {
                STATUS_REALTIME_EMPTY.to_string()
            } else {
                format!(
                    "Real-time detection: {} objects detected",
                    result.detections.len()
                )
            };
            (
                model,
                vec![Effect::DrawOverlay {
                    natural,
                    detections: result.detections,
                    mode: DrawMode::All,
                }],
            )
        }
        Err(e) => {
            model.status = format!("Real-time detection error: {}", e);
            (model, vec![])
        }
    }
}

fn on_still_detected(
    config: &Config,
    mut model: Model,
    request: Ticket,
    result: Result<DetectionResult, DetectError>,
) -> (Model, Vec<Effect>) {
    let State::Detecting {
        still,
        request: current,
    } = model.state.clone()
    else {
        return (model, vec![]);
    };
    if current != request {
        return (model, vec![]);
    }
    model.state = State::StillReady { still };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            model.panel = None;
            model.status = format!("Error: {}", e);
            return (model, vec![]);
        }
    };

    let primary = match result.primary_or_highest() {
        Some(primary) if !result.is_empty() => primary,
        _ => {
            model.panel = None;
            model.status = STATUS_NO_OBJECTS.to_string();
            return (model, vec![]);
        }
    };

    model.panel = Some(ResultPanel::new(
        &result,
        &primary,
        config.highlight_epsilon,
    ));
    model.status = match config.still_draw_mode {
        StillDrawMode::All => overlay::summary(result.detections.len()),
        _ => still_status(config, &result, &primary),
    };

    let (mode, detections) = match config.still_draw_mode {
        StillDrawMode::Single => (DrawMode::Single, vec![primary]),
        StillDrawMode::All => (DrawMode::All, result.detections),
        StillDrawMode::RankedTopK(k) => (DrawMode::RankedTopK(k), result.ranked()),
    };
    (
        model,
        vec![Effect::DrawOverlay {
            natural: still.size,
            detections,
            mode,
        }],
    )
}

fn still_status(config: &Config, result: &DetectionResult, primary: &Detection) -> String {
    let policy = &config.emphasis;
    let suffix = if result
        .detections
        .iter()
        .any(|d| d.confidence > policy.high_confidence_threshold)
    {
        format!(
            " (confidence > {:.0}%)",
            policy.high_confidence_threshold * 100.0
        )
    } else {
        format!(" (from top {} detections)", policy.fallback_top_n)
    };

    format!(
        "Detection complete! Showing bounding box for highest confidence object: {}{}",
        primary.caption(),
        suffix
    )
}
