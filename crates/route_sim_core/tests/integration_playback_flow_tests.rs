mod support;

use route_sim_core::directions::UnavailableDirections;
use route_sim_core::overlay::OverlayKind;
use route_sim_core::playback::{PlaybackState, TickOutcome};
use route_sim_core::test_helpers::{l_shaped_path, manual_controller, ScriptedDirections, EAST, WEST};
use support::{assert_close, controller_with_route_of, routed_controller, step};

#[test]
fn unavailable_directions_fall_back_to_straight_line() {
    let provider = UnavailableDirections::default();
    let (controller, _time) = routed_controller(&provider, WEST, EAST, 60.0);

    assert_eq!(controller.route().len(), 2);
    assert_close(controller.stats().total_distance_km, 0.883, 0.002);
    assert_close(controller.total_duration_secs(), 53.0, 0.5);
    assert_eq!(
        controller.route_warning(),
        Some("directions service unavailable")
    );
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(controller.current_position(), Some(WEST));
}

#[test]
fn one_kilometre_at_sixty_completes_in_a_minute_and_replays() {
    let (mut controller, time) = controller_with_route_of(1000.0, 60.0);
    assert_close(controller.total_duration_secs(), 60.0, 0.01);

    assert!(controller.play());
    step(&mut controller, &time, 30.0);
    assert_close(controller.progress_percent(), 50.0, 0.05);
    assert_eq!(controller.playback_label(), "Pause");

    time.advance_secs(30.5);
    assert_eq!(controller.tick(), TickOutcome::Completed);
    assert_eq!(controller.state(), PlaybackState::Completed);
    assert_eq!(controller.progress_percent(), 100.0);
    assert_eq!(controller.current_position(), controller.route().last());
    assert_eq!(controller.playback_label(), "Replay");

    assert!(controller.play());
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert_eq!(controller.progress_percent(), 0.0);
    assert_eq!(controller.current_position(), controller.start_point());
}

#[test]
fn doubling_speed_mid_run_keeps_progress_continuous() {
    let provider = ScriptedDirections::new(l_shaped_path());
    let path = l_shaped_path();
    let (mut controller, time) = routed_controller(&provider, path[0], path[2], 60.0);
    let duration = controller.total_duration_secs();

    controller.play();
    step(&mut controller, &time, duration / 2.0);
    let before = controller.progress_percent();
    assert_close(before, 50.0, 1e-6);

    controller.set_speed(120.0);
    assert_close(controller.progress_percent(), before, 1e-9);
    assert_close(controller.total_duration_secs(), duration / 2.0, 1e-9);

    step(&mut controller, &time, duration * 0.1);
    assert_close(controller.progress_percent(), 70.0, 1e-6);
}

#[test]
fn pause_freezes_progress_until_resumed() {
    let (mut controller, time) = controller_with_route_of(1000.0, 60.0);
    controller.play();
    step(&mut controller, &time, 12.0);
    assert!(controller.pause());
    assert_eq!(controller.playback_label(), "Resume");
    let frozen = controller.progress_percent();

    step(&mut controller, &time, 100.0);
    assert_eq!(controller.progress_percent(), frozen);

    assert!(controller.toggle_playback());
    step(&mut controller, &time, 6.0);
    assert_close(controller.progress_percent(), frozen + 10.0, 0.05);
}

#[test]
fn reset_returns_marker_to_start() {
    let (mut controller, time) = controller_with_route_of(1000.0, 60.0);
    controller.play();
    step(&mut controller, &time, 20.0);
    assert_ne!(controller.current_position(), controller.start_point());

    controller.reset();
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(controller.progress_percent(), 0.0);
    assert_eq!(controller.elapsed_secs(), 0.0);
    assert_eq!(controller.current_position(), controller.start_point());
    assert_eq!(controller.playback_label(), "Play");
}

#[test]
fn seeking_moves_marker_and_reports_stats() {
    let (mut controller, _time) = controller_with_route_of(2000.0, 60.0);
    assert!(controller.seek(25.0));
    assert_eq!(controller.state(), PlaybackState::Paused);

    let stats = controller.stats();
    assert_close(stats.traveled_km, 0.5, 0.01);
    assert_close(stats.remaining_km, 1.5, 0.01);
    assert_eq!(stats.elapsed_label(), "30s");
    assert_eq!(stats.total_label(), "2m 0s");

    let marker = controller
        .overlays()
        .marker_position(OverlayKind::CurrentMarker)
        .expect("current marker is drawn");
    assert_eq!(Some(marker), controller.current_position());

    assert!(controller.seek(100.0));
    assert_eq!(controller.state(), PlaybackState::Completed);
}

#[test]
fn repeated_seek_while_paused_lands_on_same_position() {
    let provider = ScriptedDirections::new(l_shaped_path());
    let path = l_shaped_path();
    let (mut controller, _time) = routed_controller(&provider, path[0], path[2], 60.0);

    controller.seek(37.0);
    let first = controller.current_position();
    controller.seek(37.0);

    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(controller.current_position(), first);
    assert_eq!(controller.progress_percent(), 37.0);
}

#[test]
fn repeated_seek_while_playing_lands_on_same_position() {
    let provider = ScriptedDirections::new(l_shaped_path());
    let path = l_shaped_path();
    let (mut controller, time) = routed_controller(&provider, path[0], path[2], 60.0);
    controller.play();
    step(&mut controller, &time, 5.0);

    controller.seek(37.0);
    let first = controller.current_position();
    step(&mut controller, &time, 4.0);
    assert_ne!(controller.current_position(), first);

    controller.seek(37.0);
    assert!(controller.is_playing());
    assert_eq!(controller.progress_percent(), 37.0);
    assert_eq!(controller.current_position(), first);
}

#[test]
fn drag_seek_pauses_and_resumes_running_playback() {
    let (mut controller, time) = controller_with_route_of(1000.0, 60.0);
    controller.play();
    step(&mut controller, &time, 6.0);

    controller.begin_seek_drag();
    assert!(controller.is_seek_dragging());
    assert_eq!(controller.state(), PlaybackState::Paused);

    controller.drag_seek(40.0);
    step(&mut controller, &time, 5.0);
    controller.drag_seek(75.0);
    assert_eq!(controller.progress_percent(), 75.0);

    controller.end_seek_drag();
    assert!(!controller.is_seek_dragging());
    assert!(controller.is_playing());
    step(&mut controller, &time, 3.0);
    assert_close(controller.progress_percent(), 80.0, 0.05);
}

#[test]
fn drag_seek_from_pause_stays_paused() {
    let (mut controller, _time) = controller_with_route_of(1000.0, 60.0);
    controller.begin_seek_drag();
    controller.drag_seek(30.0);
    controller.end_seek_drag();
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(controller.progress_percent(), 30.0);
}

#[test]
fn drag_to_end_does_not_restart() {
    let (mut controller, _time) = controller_with_route_of(1000.0, 60.0);
    controller.play();
    controller.begin_seek_drag();
    controller.drag_seek(100.0);
    controller.end_seek_drag();
    assert_eq!(controller.state(), PlaybackState::Completed);
}

#[test]
fn play_without_route_is_rejected() {
    let (mut controller, _time) = manual_controller(60.0);
    assert!(!controller.play());
    assert!(!controller.seek(50.0));
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(controller.current_position(), None);
}

#[test]
fn identical_endpoints_complete_immediately() {
    let provider = UnavailableDirections::default();
    let (mut controller, _time) = routed_controller(&provider, WEST, WEST, 60.0);
    assert_eq!(controller.route().total_distance_m(), 0.0);

    assert!(controller.play());
    assert_eq!(controller.state(), PlaybackState::Completed);
    assert_eq!(controller.progress_percent(), 100.0);
    assert_eq!(controller.current_position(), Some(WEST));
}
