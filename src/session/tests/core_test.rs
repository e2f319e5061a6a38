#[cfg(test)]
mod core_test {
    use crate::config::{Config, StillDrawMode};
    use crate::device_camera::interface::DeviceCameraEvent;
    use crate::device_input::interface::UserCommand;
    use crate::error::{CameraError, DetectError};
    use crate::geometry::Size;
    use crate::overlay::DrawMode;
    use crate::session::core::{
        init, transition, Effect, Event, Model, Pending, State, STATUS_IDLE, STATUS_NO_OBJECTS,
        STATUS_REALTIME_ACTIVE, STATUS_REALTIME_EMPTY,
    };
    use crate::session::render::view;
    use crate::session::tests::fixture::{detection, result};
    use crate::session::ticket::Ticket;
    use std::path::PathBuf;

    fn user(config: &Config, model: Model, command: UserCommand) -> (Model, Vec<Effect>) {
        transition(config, model, Event::User(command))
    }

    fn camera_ready(config: &Config) -> Model {
        let (model, _) = init(config);
        let (model, _) = user(config, model, UserCommand::RequestCamera);
        let ticket = model.last_ticket;
        let (model, _) = transition(
            config,
            model,
            Event::CameraRequestDone {
                ticket,
                result: Ok(Size::new(640.0, 480.0)),
            },
        );
        model
    }

    fn running(config: &Config) -> (Model, Ticket) {
        let (model, _) = user(config, camera_ready(config), UserCommand::StartRealTime);
        let run = model.last_ticket;
        (model, run)
    }

    fn detecting(config: &Config) -> (Model, Ticket) {
        let (model, _) = init(config);
        let (model, _) = user(config, model, UserCommand::LoadFile(PathBuf::from("a.png")));
        let ticket = model.last_ticket;
        let (model, _) = transition(
            config,
            model,
            Event::FileLoadDone {
                ticket,
                result: Ok(Size::new(800.0, 600.0)),
            },
        );
        let (model, _) = user(config, model, UserCommand::Submit);
        let request = model.last_ticket;
        (model, request)
    }

    #[test]
    fn test_init() {
        let config = Config::default();
        let (model, effects) = init(&config);

        assert_eq!(model.state, State::Idle);
        assert_eq!(model.status, STATUS_IDLE);
        assert_eq!(model.model_id, "yolo11n.pt");
        assert_eq!(effects, vec![Effect::SubscribeToCameraEvents]);
    }

    #[test]
    fn test_camera_grant_enters_camera_ready() {
        let config = Config::default();
        let (model, _) = init(&config);

        let (model, effects) = user(&config, model, UserCommand::RequestCamera);
        let ticket = model.last_ticket;
        assert_eq!(model.pending, Some(Pending::Camera(ticket)));
        assert_eq!(effects, vec![Effect::RequestCamera { ticket }]);

        let (model, effects) = transition(
            &config,
            model,
            Event::CameraRequestDone {
                ticket,
                result: Ok(Size::new(640.0, 480.0)),
            },
        );
        assert_eq!(
            model.state,
            State::CameraReady {
                camera: ticket,
                size: Size::new(640.0, 480.0)
            }
        );
        assert_eq!(model.pending, None);
        assert_eq!(effects, vec![Effect::ClearOverlay, Effect::ShowMedia]);
    }

    #[test]
    fn test_camera_denied_stays_idle() {
        let config = Config::default();
        let (model, _) = user(&config, init(&config).0, UserCommand::RequestCamera);
        let ticket = model.last_ticket;

        let (model, effects) = transition(
            &config,
            model,
            Event::CameraRequestDone {
                ticket,
                result: Err(CameraError::PermissionDenied("blocked by user".to_string())),
            },
        );

        assert_eq!(model.state, State::Idle);
        assert!(model.status.contains("blocked by user"));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_stale_camera_grant_is_released() {
        let config = Config::default();
        let (model, _) = user(&config, init(&config).0, UserCommand::RequestCamera);
        let ticket = model.last_ticket;
        let (model, _) = user(&config, model, UserCommand::Reset);

        let (model, effects) = transition(
            &config,
            model,
            Event::CameraRequestDone {
                ticket,
                result: Ok(Size::new(640.0, 480.0)),
            },
        );

        assert_eq!(model.state, State::Idle);
        assert_eq!(effects, vec![Effect::ReleaseMediaIf { ticket }]);
    }

    #[test]
    fn test_pending_request_blocks_other_media_commands() {
        let config = Config::default();
        let (model, _) = user(&config, init(&config).0, UserCommand::RequestCamera);

        let (same, effects) = user(&config, model.clone(), UserCommand::LoadFile(PathBuf::from("x.png")));
        assert_eq!(same, model);
        assert!(effects.is_empty());

        let (reset, effects) = user(&config, model, UserCommand::Reset);
        assert_eq!(reset.pending, None);
        assert!(effects.contains(&Effect::ReleaseMedia));
    }

    #[test]
    fn test_start_is_idempotent() {
        let config = Config::default();
        let (model, run) = running(&config);
        assert!(matches!(model.state, State::RealTimeRunning { .. }));
        assert_eq!(model.status, STATUS_REALTIME_ACTIVE);

        let (again, effects) = user(&config, model.clone(), UserCommand::StartRealTime);

        assert_eq!(again, model);
        assert!(effects.is_empty());
        assert!(matches!(again.state, State::RealTimeRunning { run: r, .. } if r == run));
    }

    #[test]
    fn test_start_emits_one_ticker() {
        let config = Config::default();
        let (_, effects) = user(&config, camera_ready(&config), UserCommand::StartRealTime);

        let tickers = effects
            .iter()
            .filter(|e| matches!(e, Effect::StartTicker { .. }))
            .count();
        assert_eq!(tickers, 1);
    }

    #[test]
    fn test_start_without_camera_is_ignored() {
        let config = Config::default();
        let (model, effects) = user(&config, init(&config).0, UserCommand::StartRealTime);

        assert_eq!(model.state, State::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_stop_cancels_ticker_and_clears() {
        let config = Config::default();
        let (model, _) = running(&config);
        let State::RealTimeRunning { cancel, camera, .. } = model.state.clone() else {
            panic!("not running");
        };

        let (model, effects) = user(&config, model, UserCommand::StopRealTime);

        assert!(matches!(model.state, State::CameraReady { camera: c, .. } if c == camera));
        assert_eq!(
            effects,
            vec![Effect::CancelTicker { cancel }, Effect::ClearOverlay]
        );
    }

    #[test]
    fn test_live_response_after_stop_is_discarded() {
        let config = Config::default();
        let (model, run) = running(&config);
        let (model, _) = user(&config, model, UserCommand::StopRealTime);

        let (after, effects) = transition(
            &config,
            model.clone(),
            Event::LiveDetectDone {
                run,
                natural: Size::new(640.0, 480.0),
                result: Ok(result(vec![detection("cat", 0.9, [0.0, 0.0, 10.0, 10.0])])),
            },
        );

        assert_eq!(after, model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_live_response_from_previous_run_is_discarded() {
        let config = Config::default();
        let (model, old_run) = running(&config);
        let (model, _) = user(&config, model, UserCommand::StopRealTime);
        let (model, _) = user(&config, model, UserCommand::StartRealTime);

        let (_, effects) = transition(
            &config,
            model,
            Event::LiveDetectDone {
                run: old_run,
                natural: Size::new(640.0, 480.0),
                result: Ok(result(vec![])),
            },
        );

        assert!(effects.is_empty());
    }

    #[test]
    fn test_live_response_draws_all_and_reports_count() {
        let config = Config::default();
        let (model, run) = running(&config);
        let detections = vec![
            detection("cat", 0.9, [0.0, 0.0, 10.0, 10.0]),
            detection("dog", 0.5, [5.0, 5.0, 20.0, 20.0]),
        ];

        let (model, effects) = transition(
            &config,
            model,
            Event::LiveDetectDone {
                run,
                natural: Size::new(1280.0, 720.0),
                result: Ok(result(detections.clone())),
            },
        );

        assert_eq!(model.status, "Real-time detection: 2 objects detected");
        assert_eq!(
            effects,
            vec![Effect::DrawOverlay {
                natural: Size::new(1280.0, 720.0),
                detections,
                mode: DrawMode::All,
            }]
        );

        let (model, _) = transition(
            &config,
            model,
            Event::LiveDetectDone {
                run,
                natural: Size::new(1280.0, 720.0),
                result: Ok(result(vec![])),
            },
        );
        assert_eq!(model.status, STATUS_REALTIME_EMPTY);
    }

    #[test]
    fn test_live_error_keeps_running() {
        let config = Config::default();
        let (model, run) = running(&config);

        let (model, effects) = transition(
            &config,
            model,
            Event::LiveDetectDone {
                run,
                natural: Size::new(640.0, 480.0),
                result: Err(DetectError::Network("connection refused".to_string())),
            },
        );

        assert!(matches!(model.state, State::RealTimeRunning { .. }));
        assert_eq!(
            model.status,
            "Real-time detection error: network error: connection refused"
        );
        assert!(effects.is_empty());

        let (_, effects) = transition(&config, model, Event::RealTimeTick { run });
        assert_eq!(effects, vec![Effect::CaptureLiveFrame { run }]);
    }

    #[test]
    fn test_camera_disconnect_stops_realtime() {
        let config = Config::default();
        let (model, _) = running(&config);

        let (model, effects) = transition(
            &config,
            model,
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        );

        assert!(matches!(model.state, State::CameraReady { .. }));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::CancelTicker { .. })));
    }

    #[test]
    fn test_submit_disabled_while_detecting() {
        let config = Config::default();
        let (model, request) = detecting(&config);
        assert!(matches!(model.state, State::Detecting { request: r, .. } if r == request));
        assert!(!view(&config, &model).controls.submit_enabled);

        let (again, effects) = user(&config, model.clone(), UserCommand::Submit);

        assert_eq!(again, model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_still_failure_reenables_submit() {
        let config = Config::default();
        let (model, request) = detecting(&config);

        let (model, effects) = transition(
            &config,
            model,
            Event::StillDetectDone {
                request,
                result: Err(DetectError::Server {
                    status: 400,
                    message: "No image part".to_string(),
                }),
            },
        );

        assert!(matches!(model.state, State::StillReady { .. }));
        assert_eq!(model.status, "Error: No image part");
        assert!(model.panel.is_none());
        assert!(effects.is_empty());
        assert!(view(&config, &model).controls.submit_enabled);
    }

    #[test]
    fn test_still_empty_result_hides_panel() {
        let config = Config::default();
        let (model, request) = detecting(&config);

        let (model, effects) = transition(
            &config,
            model,
            Event::StillDetectDone {
                request,
                result: Ok(result(vec![])),
            },
        );

        assert_eq!(model.status, STATUS_NO_OBJECTS);
        assert!(model.panel.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_still_low_confidence_uses_fallback_suffix() {
        let config = Config::default();
        let (model, request) = detecting(&config);

        let (model, effects) = transition(
            &config,
            model,
            Event::StillDetectDone {
                request,
                result: Ok(result(vec![
                    detection("cup", 0.35, [0.0, 0.0, 5.0, 5.0]),
                    detection("book", 0.62, [1.0, 1.0, 9.0, 9.0]),
                ])),
            },
        );

        assert_eq!(
            model.status,
            "Detection complete! Showing bounding box for highest confidence object: \
             book (62.0%) (from top 10 detections)"
        );
        assert!(matches!(
            &effects[..],
            [Effect::DrawOverlay { detections, mode: DrawMode::Single, .. }]
                if detections.len() == 1 && detections[0].label == "book"
        ));
    }

    #[test]
    fn test_ranked_mode_draws_in_confidence_order() {
        let mut config = Config::default();
        config.still_draw_mode = StillDrawMode::RankedTopK(2);
        let (model, request) = detecting(&config);

        let (_, effects) = transition(
            &config,
            model,
            Event::StillDetectDone {
                request,
                result: Ok(result(vec![
                    detection("cup", 0.35, [0.0, 0.0, 5.0, 5.0]),
                    detection("dog", 0.91, [1.0, 1.0, 9.0, 9.0]),
                ])),
            },
        );

        let Some(Effect::DrawOverlay {
            detections,
            mode,
            natural,
        }) = effects.first()
        else {
            panic!("expected a draw");
        };
        assert_eq!(*mode, DrawMode::RankedTopK(2));
        assert_eq!(*natural, Size::new(800.0, 600.0));
        assert_eq!(detections[0].label, "dog");
    }

    #[test]
    fn test_all_mode_reports_object_count() {
        let mut config = Config::default();
        config.still_draw_mode = StillDrawMode::All;
        let (model, request) = detecting(&config);

        let (after, effects) = transition(
            &config,
            model,
            Event::StillDetectDone {
                request,
                result: Ok(result(vec![
                    detection("cup", 0.35, [0.0, 0.0, 5.0, 5.0]),
                    detection("dog", 0.91, [1.0, 1.0, 9.0, 9.0]),
                    detection("cat", 0.88, [2.0, 2.0, 7.0, 7.0]),
                ])),
            },
        );

        assert_eq!(after.status, "Found 3 objects!");
        assert!(after.panel.is_some());
        assert!(matches!(
            effects.as_slice(),
            [Effect::DrawOverlay { detections, mode: DrawMode::All, .. }] if detections.len() == 3
        ));
    }

    #[test]
    fn test_stale_still_response_is_ignored_after_reset() {
        let config = Config::default();
        let (model, request) = detecting(&config);
        let (model, _) = user(&config, model, UserCommand::Reset);

        let (after, effects) = transition(
            &config,
            model.clone(),
            Event::StillDetectDone {
                request,
                result: Ok(result(vec![detection("cat", 0.9, [0.0, 0.0, 1.0, 1.0])])),
            },
        );

        assert_eq!(after, model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_select_model() {
        let config = Config::default();
        let (model, _) = init(&config);

        let (model, _) = user(&config, model, UserCommand::SelectModel("yolo8n.pt".to_string()));
        assert_eq!(model.model_id, "yolo8n.pt");

        let (model, _) = user(&config, model, UserCommand::SelectModel("bogus.pt".to_string()));
        assert_eq!(model.model_id, "yolo8n.pt");
        assert_eq!(model.status, "Unknown model: bogus.pt");
    }

    #[test]
    fn test_reset_from_running_cancels_and_releases() {
        let config = Config::default();
        let (model, _) = running(&config);

        let (model, effects) = user(&config, model, UserCommand::Reset);

        assert_eq!(model.state, State::Idle);
        assert!(matches!(effects[0], Effect::CancelTicker { .. }));
        assert!(effects.contains(&Effect::ReleaseMedia));
        assert!(effects.contains(&Effect::ClearOverlay));
    }
}
