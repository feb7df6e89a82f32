//! Route movement simulator: turns a directions polyline into a time-based
//! position feed with play / pause / seek / reset semantics.

pub mod config;
pub mod controller;
pub mod directions;
pub mod geo;
pub mod input;
pub mod interpolate;
pub mod logging;
pub mod overlay;
pub mod playback;
pub mod route;
pub mod stats;
pub mod time;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
