use route_sim_core::controller::SimulationController;
use route_sim_core::directions::{DirectionsProvider, RouteRequest};
use route_sim_core::geo::Coordinate;
use route_sim_core::overlay::OverlaySet;
use route_sim_core::test_helpers::{manual_controller, ScriptedDirections};
use route_sim_core::time::ManualTime;

pub type TestController = SimulationController<ManualTime, OverlaySet>;

/// Controller with both endpoints set and the route from `provider` applied.
pub fn routed_controller(
    provider: &dyn DirectionsProvider,
    start: Coordinate,
    end: Coordinate,
    speed_kmh: f64,
) -> (TestController, ManualTime) {
    let (mut controller, time) = manual_controller(speed_kmh);
    assert!(controller.set_start_point(start).is_none());
    let request = controller
        .set_end_point(end)
        .expect("both endpoints set should request a route");
    assert!(controller.resolve_with(provider, request));
    (controller, time)
}

/// Controller loaded with a straight north-bound route of roughly `meters`.
pub fn controller_with_route_of(meters: f64, speed_kmh: f64) -> (TestController, ManualTime) {
    let start = Coordinate::new(37.5, 127.0);
    let end = Coordinate::new(37.5 + meters / 111_194.9, 127.0);
    let provider = ScriptedDirections::new(vec![start, end]);
    routed_controller(&provider, start, end, speed_kmh)
}

/// Advance the shared clock and tick once.
pub fn step(controller: &mut TestController, time: &ManualTime, secs: f64) {
    time.advance_secs(secs);
    controller.tick();
}

pub fn request_for(controller: &mut TestController, end: Coordinate) -> RouteRequest {
    controller
        .set_end_point(end)
        .expect("start point should already be set")
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
