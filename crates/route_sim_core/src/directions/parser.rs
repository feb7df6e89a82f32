use crate::geo::Coordinate;

use super::error::DirectionsError;
use super::response::{DirectionsResponse, ErrorBody};
use super::RouteOption;

pub(super) fn parse_directions_response(
    resp: DirectionsResponse,
    option: RouteOption,
) -> Result<Vec<Coordinate>, DirectionsError> {
    if resp.code != 0 {
        return Err(DirectionsError::Api {
            code: resp.code,
            message: resp.message.filter(|message| !message.trim().is_empty()),
        });
    }

    let mut routes = resp.route.ok_or(DirectionsError::NoRoute)?;
    let route = routes
        .remove(option.as_str())
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or(DirectionsError::NoRoute)?;

    if route.path.len() < 2 {
        return Err(DirectionsError::NoRoute);
    }

    Ok(route
        .path
        .into_iter()
        .map(Coordinate::from_lng_lat)
        .collect())
}

/// Parse a raw JSON success body for `option`.
pub fn parse_directions_body(
    body: &str,
    option: RouteOption,
) -> Result<Vec<Coordinate>, DirectionsError> {
    let parsed: DirectionsResponse = serde_json::from_str(body)
        .map_err(|err| DirectionsError::InvalidResponse(err.to_string()))?;
    parse_directions_response(parsed, option)
}

/// Map a non-2xx proxy response to an error, preferring its `{error}` message.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(super) fn parse_error_body(status: u16, body: &str) -> DirectionsError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.trim().is_empty());
    DirectionsError::Status { status, message }
}
