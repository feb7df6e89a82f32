//! Tracing subscriber setup shared by the UI binary and headless runs.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_DIRECTIVE: &str = "route_sim_core=info";

/// Install a formatted stderr subscriber. `RUST_LOG` overrides `default_directive`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
