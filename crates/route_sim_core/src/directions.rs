//! Directions service access: trait abstraction plus the HTTP, cached, and
//! offline providers.
//!
//! - **`HttpDirectionsClient`** (feature `http`): calls the directions proxy at
//!   `{base_url}/api/directions` and extracts the `[lng, lat]` path.
//! - **`CachedDirectionsProvider`**: LRU cache of successful routes around any
//!   provider.
//! - **`UnavailableDirections`**: always fails, so every route becomes the
//!   straight-line fallback.
//!
//! Fetches are executed off the UI thread by [`RouteFetchWorker`]; results come
//! back as [`RouteResolution`]s tagged with the generation of the request.

use std::fmt;
use std::sync::Arc;
#[cfg(feature = "http")]
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SimulationConfig;
use crate::geo::Coordinate;

mod cache;
#[cfg(feature = "http")]
mod client;
mod error;
mod parser;
mod response;
mod worker;


pub use cache::CachedDirectionsProvider;
#[cfg(feature = "http")]
pub use client::HttpDirectionsClient;
pub use error::DirectionsError;
pub use parser::parse_directions_body;
pub use worker::{fetch_now, RouteFetchWorker};

/// Route preference forwarded to the directions provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOption {
    /// Fastest route.
    #[default]
    Trafast,
    /// Most comfortable route.
    Tracomfort,
    /// Balanced route.
    Traoptimal,
    /// Avoid toll roads.
    Traavoidtoll,
    /// Avoid car-only roads.
    Traavoidcaronly,
}

impl RouteOption {
    pub const ALL: [RouteOption; 5] = [
        RouteOption::Trafast,
        RouteOption::Tracomfort,
        RouteOption::Traoptimal,
        RouteOption::Traavoidtoll,
        RouteOption::Traavoidcaronly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteOption::Trafast => "trafast",
            RouteOption::Tracomfort => "tracomfort",
            RouteOption::Traoptimal => "traoptimal",
            RouteOption::Traavoidtoll => "traavoidtoll",
            RouteOption::Traavoidcaronly => "traavoidcaronly",
        }
    }
}

impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for directions backends. Providers are shared with worker threads,
/// hence `Send + Sync`.
pub trait DirectionsProvider: Send + Sync {
    /// Ordered path from `start` to `end`.
    fn fetch(
        &self,
        start: Coordinate,
        end: Coordinate,
        option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError>;
}

/// A route fetch the controller wants executed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Monotonic counter; only the latest generation is accepted.
    pub generation: u64,
    pub start: Coordinate,
    pub end: Coordinate,
    pub option: RouteOption,
}

/// Result of executing a [`RouteRequest`].
#[derive(Debug)]
pub struct RouteResolution {
    pub request: RouteRequest,
    pub outcome: Result<Vec<Coordinate>, DirectionsError>,
}

/// Offline provider: every fetch fails with the given reason.
#[derive(Debug, Clone)]
pub struct UnavailableDirections {
    reason: String,
}

impl UnavailableDirections {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableDirections {
    fn default() -> Self {
        Self::new("directions service unavailable")
    }
}

impl DirectionsProvider for UnavailableDirections {
    fn fetch(
        &self,
        _start: Coordinate,
        _end: Coordinate,
        _option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        Err(DirectionsError::Unavailable(self.reason.clone()))
    }
}

/// Construct the provider stack described by `config`.
///
/// Online mode wraps the HTTP client in a [`CachedDirectionsProvider`]. Offline
/// mode, a build without the `http` feature, or a client that fails to build all
/// yield [`UnavailableDirections`].
pub fn build_directions_provider(config: &SimulationConfig) -> Arc<dyn DirectionsProvider> {
    if config.offline {
        return Arc::new(UnavailableDirections::new("offline mode"));
    }
    build_http_provider(config)
}

#[cfg(feature = "http")]
fn build_http_provider(config: &SimulationConfig) -> Arc<dyn DirectionsProvider> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    match HttpDirectionsClient::new(&config.directions_base_url, timeout) {
        Ok(client) => Arc::new(CachedDirectionsProvider::new(
            Box::new(client),
            config.route_cache_capacity,
        )),
        Err(err) => {
            warn!(error = %err, "failed to build directions client, routes will be straight lines");
            Arc::new(UnavailableDirections::new(err.to_string()))
        }
    }
}

#[cfg(not(feature = "http"))]
fn build_http_provider(_config: &SimulationConfig) -> Arc<dyn DirectionsProvider> {
    warn!("built without the `http` feature, routes will be straight lines");
    Arc::new(UnavailableDirections::new(
        "directions client not compiled in",
    ))
}
