//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures for unit tests, integration tests, and benches.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::controller::SimulationController;
use crate::directions::{DirectionsError, DirectionsProvider, RouteOption};
use crate::geo::Coordinate;
use crate::overlay::OverlaySet;
use crate::time::ManualTime;

/// Seoul City Hall, the default map center.
pub const CITY_HALL: Coordinate = Coordinate::new(37.5665, 126.978);

/// Two points on the same parallel, about 0.883 km apart.
pub const WEST: Coordinate = Coordinate::new(37.5, 127.0);
pub const EAST: Coordinate = Coordinate::new(37.5, 127.01);

/// Three-point path with known cumulative distances (0 m, ~1112 m, ~1994 m).
pub fn l_shaped_path() -> Vec<Coordinate> {
    vec![
        Coordinate::new(37.50, 127.00),
        Coordinate::new(37.51, 127.00),
        Coordinate::new(37.51, 127.01),
    ]
}

/// Controller over a manual clock and an in-memory overlay set.
///
/// Returns the time handle so callers can advance the shared clock.
pub fn manual_controller(speed_kmh: f64) -> (SimulationController<ManualTime, OverlaySet>, ManualTime) {
    let time = ManualTime::new();
    let controller = SimulationController::new(time.clone(), OverlaySet::new(), speed_kmh);
    (controller, time)
}

/// Provider that returns a fixed path for every request and counts calls.
#[derive(Debug, Default)]
pub struct ScriptedDirections {
    path: Vec<Coordinate>,
    calls: AtomicUsize,
}

impl ScriptedDirections {
    pub fn new(path: Vec<Coordinate>) -> Self {
        Self {
            path,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DirectionsProvider for ScriptedDirections {
    fn fetch(
        &self,
        _start: Coordinate,
        _end: Coordinate,
        _option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.path.clone())
    }
}

/// Provider that fails every request with an HTTP status error.
#[derive(Debug)]
pub struct FailingDirections {
    status: u16,
}

impl FailingDirections {
    pub fn with_status(status: u16) -> Self {
        Self { status }
    }
}

impl DirectionsProvider for FailingDirections {
    fn fetch(
        &self,
        _start: Coordinate,
        _end: Coordinate,
        _option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        Err(DirectionsError::Status {
            status: self.status,
            message: None,
        })
    }
}
