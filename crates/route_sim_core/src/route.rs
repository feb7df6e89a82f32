//! Route model: polyline vertices annotated with cumulative path length.
//!
//! A [`Route`] is built once per (start, end) pair and replaced wholesale when a
//! new route resolves. When the directions service fails, [`resolve_route`]
//! substitutes a straight two-point line so the simulation always has a usable
//! (possibly degenerate) path once both endpoints are set.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::directions::DirectionsError;
use crate::geo::{distance_km, Coordinate};
use crate::interpolate::interpolate;

/// A polyline vertex with the total distance walked to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub lat: f64,
    pub lng: f64,
    pub cumulative_distance_m: f64,
}

impl RouteSegment {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Ordered, immutable sequence of [`RouteSegment`]s.
///
/// The first segment sits at distance 0 and distances never decrease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    segments: Vec<RouteSegment>,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.segments.first().map(RouteSegment::coordinate)
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.segments.last().map(RouteSegment::coordinate)
    }

    /// Total path length in metres (0 for an empty route).
    pub fn total_distance_m(&self) -> f64 {
        self.segments
            .last()
            .map(|segment| segment.cumulative_distance_m)
            .unwrap_or(0.0)
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m() / 1000.0
    }

    /// Vertex coordinates, in order, for drawing the polyline.
    pub fn path(&self) -> Vec<Coordinate> {
        self.segments.iter().map(RouteSegment::coordinate).collect()
    }

    /// Interpolated position `distance_m` metres along the route.
    pub fn position_at(&self, distance_m: f64) -> Option<Coordinate> {
        interpolate(&self.segments, distance_m)
    }

    /// Interpolated position at `progress_percent` of the total length.
    pub fn position_at_progress(&self, progress_percent: f64) -> Option<Coordinate> {
        self.position_at(self.total_distance_m() * progress_percent / 100.0)
    }
}

/// Annotate a raw path with cumulative distances.
pub fn build_route(raw_path: &[Coordinate]) -> Route {
    let mut segments = Vec::with_capacity(raw_path.len());
    let mut running_total_m = 0.0;
    let mut prev: Option<Coordinate> = None;

    for &point in raw_path {
        if let Some(prev) = prev {
            running_total_m += distance_km(prev, point) * 1000.0;
        }
        segments.push(RouteSegment {
            lat: point.lat,
            lng: point.lng,
            cumulative_distance_m: running_total_m,
        });
        prev = Some(point);
    }

    Route { segments }
}

/// Synthetic two-point route used when no road route is available.
pub fn straight_line_route(start: Coordinate, end: Coordinate) -> Route {
    build_route(&[start, end])
}

/// Outcome of turning a directions result into a usable route.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub route: Route,
    /// User-visible warning when the straight-line fallback was used.
    pub warning: Option<String>,
}

impl ResolvedRoute {
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Build the route for `start`→`end` from a directions outcome, falling back to
/// a straight line on any error or an unusable path. Never fails.
pub fn resolve_route(
    start: Coordinate,
    end: Coordinate,
    outcome: Result<Vec<Coordinate>, DirectionsError>,
) -> ResolvedRoute {
    let outcome = outcome.and_then(|path| {
        if path.len() < 2 {
            Err(DirectionsError::NoRoute)
        } else {
            Ok(path)
        }
    });

    match outcome {
        Ok(path) => {
            let route = build_route(&path);
            info!(
                vertices = route.len(),
                distance_m = route.total_distance_m(),
                "route resolved"
            );
            ResolvedRoute {
                route,
                warning: None,
            }
        }
        Err(err) => {
            warn!(error = %err, "directions failed, using straight-line route");
            ResolvedRoute {
                route: straight_line_route(start, end),
                warning: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> Vec<Coordinate> {
        vec![
            Coordinate::new(37.5000, 127.0000),
            Coordinate::new(37.5000, 127.0050),
            Coordinate::new(37.5040, 127.0050),
            Coordinate::new(37.5040, 127.0050),
            Coordinate::new(37.5080, 127.0100),
        ]
    }

    #[test]
    fn first_segment_is_at_zero_and_distances_never_decrease() {
        let route = build_route(&sample_path());
        assert_eq!(route.len(), 5);
        assert_eq!(route.segments()[0].cumulative_distance_m, 0.0);
        for pair in route.segments().windows(2) {
            assert!(pair[1].cumulative_distance_m >= pair[0].cumulative_distance_m);
        }
    }

    #[test]
    fn total_distance_is_sum_of_legs() {
        let path = sample_path();
        let expected_m: f64 = path
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]) * 1000.0)
            .sum();
        let route = build_route(&path);
        assert!((route.total_distance_m() - expected_m).abs() < 1e-9);
    }

    #[test]
    fn empty_path_builds_empty_route() {
        let route = build_route(&[]);
        assert!(route.is_empty());
        assert_eq!(route.total_distance_m(), 0.0);
        assert!(route.position_at(10.0).is_none());
    }

    #[test]
    fn failed_directions_fall_back_to_straight_line() {
        let start = Coordinate::new(37.5, 127.0);
        let end = Coordinate::new(37.5, 127.01);
        let resolved = resolve_route(start, end, Err(DirectionsError::NoRoute));

        assert!(resolved.is_fallback());
        assert_eq!(resolved.route.len(), 2);
        assert_eq!(resolved.route.first(), Some(start));
        assert_eq!(resolved.route.last(), Some(end));
        let expected_m = distance_km(start, end) * 1000.0;
        assert!((resolved.route.total_distance_m() - expected_m).abs() < 1e-9);
    }

    #[test]
    fn single_point_path_is_treated_as_no_route() {
        let start = Coordinate::new(37.5, 127.0);
        let end = Coordinate::new(37.6, 127.1);
        let resolved = resolve_route(start, end, Ok(vec![start]));
        assert_eq!(resolved.route.len(), 2);
        assert_eq!(
            resolved.warning.as_deref(),
            Some(DirectionsError::NoRoute.to_string().as_str())
        );
    }

    #[test]
    fn successful_directions_keep_all_vertices() {
        let start = Coordinate::new(37.5, 127.0);
        let end = Coordinate::new(37.508, 127.01);
        let resolved = resolve_route(start, end, Ok(sample_path()));
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.route.len(), 5);
    }
}
