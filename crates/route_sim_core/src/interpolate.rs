//! Position interpolation along a route by path distance.

use crate::geo::Coordinate;
use crate::route::RouteSegment;

/// Position `target_distance_m` metres along `segments`.
///
/// Returns `None` for an empty route. Targets beyond the last vertex clamp to
/// the last point; targets below zero (or NaN) clamp to the first point.
/// Within the bracketing pair, latitude and longitude are interpolated
/// independently; a zero-length pair yields its first vertex.
pub fn interpolate(segments: &[RouteSegment], target_distance_m: f64) -> Option<Coordinate> {
    let first = segments.first()?;
    if target_distance_m.is_nan() || target_distance_m <= first.cumulative_distance_m {
        return Some(first.coordinate());
    }

    for pair in segments.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if target_distance_m >= current.cumulative_distance_m
            && target_distance_m <= next.cumulative_distance_m
        {
            let span = next.cumulative_distance_m - current.cumulative_distance_m;
            let t = if span > 0.0 {
                (target_distance_m - current.cumulative_distance_m) / span
            } else {
                0.0
            };
            return Some(current.coordinate().lerp(next.coordinate(), t));
        }
    }

    segments.last().map(RouteSegment::coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(lat: f64, lng: f64, cumulative_distance_m: f64) -> RouteSegment {
        RouteSegment {
            lat,
            lng,
            cumulative_distance_m,
        }
    }

    fn three_segment_route() -> Vec<RouteSegment> {
        vec![
            segment(37.50, 127.00, 0.0),
            segment(37.51, 127.00, 1000.0),
            segment(37.51, 127.02, 3000.0),
        ]
    }

    fn assert_close(actual: Coordinate, expected: Coordinate) {
        assert!(
            (actual.lat - expected.lat).abs() < 1e-12 && (actual.lng - expected.lng).abs() < 1e-12,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn empty_route_has_no_position() {
        assert!(interpolate(&[], 0.0).is_none());
    }

    #[test]
    fn endpoints_map_to_first_and_last_vertex() {
        let route = three_segment_route();
        assert_eq!(interpolate(&route, 0.0), Some(route[0].coordinate()));
        assert_eq!(interpolate(&route, 3000.0), Some(route[2].coordinate()));
    }

    #[test]
    fn target_inside_second_leg_is_linear() {
        let route = three_segment_route();
        let position = interpolate(&route, 1500.0).expect("position");
        // 500 m into a 2000 m leg
        assert_close(position, Coordinate::new(37.51, 127.005));
    }

    #[test]
    fn target_past_end_clamps_to_last_point() {
        let route = three_segment_route();
        assert_eq!(interpolate(&route, 10_000.0), Some(route[2].coordinate()));
    }

    #[test]
    fn negative_target_clamps_to_first_point() {
        let route = three_segment_route();
        assert_eq!(interpolate(&route, -5.0), Some(route[0].coordinate()));
    }

    #[test]
    fn zero_length_leg_does_not_divide_by_zero() {
        let route = vec![
            segment(37.50, 127.00, 0.0),
            segment(37.51, 127.00, 1000.0),
            segment(37.51, 127.00, 1000.0),
            segment(37.52, 127.00, 2000.0),
        ];
        let position = interpolate(&route, 1000.0).expect("position");
        assert!(position.lat.is_finite() && position.lng.is_finite());
        assert_close(position, Coordinate::new(37.51, 127.00));
    }

    #[test]
    fn single_vertex_route_always_returns_that_vertex() {
        let route = vec![segment(37.5, 127.0, 0.0)];
        assert_eq!(interpolate(&route, 42.0), Some(route[0].coordinate()));
    }

    #[test]
    fn latitude_never_moves_backwards_on_northbound_route() {
        let route = vec![
            segment(37.50, 127.0, 0.0),
            segment(37.51, 127.0, 1000.0),
            segment(37.53, 127.0, 3000.0),
        ];
        let mut last_lat = f64::MIN;
        for step in 0..=300 {
            let lat = interpolate(&route, step as f64 * 10.0).expect("position").lat;
            assert!(lat >= last_lat);
            last_lat = lat;
        }
    }
}
