use std::collections::HashMap;

use serde::Deserialize;

/// Minimal directions JSON: `code`, optional `message`, and routes keyed by
/// option name (`route.trafast[0].path`).
#[derive(Debug, Deserialize)]
pub(super) struct DirectionsResponse {
    pub(super) code: i64,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) route: Option<HashMap<String, Vec<DirectionsRoute>>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsRoute {
    #[serde(default)]
    pub(super) path: Vec<[f64; 2]>, // [lng, lat]
}

/// Error body returned by the proxy on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) error: Option<String>,
}
