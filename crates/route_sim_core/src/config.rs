//! Runtime configuration: directions endpoint, defaults for speed and map view.
//!
//! Loaded from a JSON file (missing file → defaults), then overridden from the
//! environment, then normalized so out-of-range values never reach the engine.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directions::RouteOption;
use crate::geo::Coordinate;
use crate::input::{DEFAULT_SPEED_KMH, MAX_SPEED_KMH, MIN_SPEED_KMH};

pub const CONFIG_FILE_NAME: &str = "route_sim.json";
pub const ENV_API_BASE_URL: &str = "ROUTE_SIM_API_BASE_URL";
pub const ENV_OFFLINE: &str = "ROUTE_SIM_OFFLINE";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3003";
/// Seoul City Hall.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate::new(37.5665, 126.978);
pub const DEFAULT_MAP_ZOOM: u8 = 13;
pub const MIN_MAP_ZOOM: u8 = 1;
pub const MAX_MAP_ZOOM: u8 = 21;

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    InvalidFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(message) => write!(f, "{message}"),
            ConfigError::InvalidFormat(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Base URL of the directions proxy (without `/api/directions`).
    pub directions_base_url: String,
    pub route_option: RouteOption,
    pub default_speed_kmh: f64,
    pub request_timeout_secs: u64,
    pub route_cache_capacity: usize,
    pub map_center: Coordinate,
    pub map_zoom: u8,
    /// Skip the directions service entirely; every route is a straight line.
    pub offline: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            directions_base_url: DEFAULT_BASE_URL.to_string(),
            route_option: RouteOption::default(),
            default_speed_kmh: DEFAULT_SPEED_KMH,
            request_timeout_secs: 5,
            route_cache_capacity: 256,
            map_center: DEFAULT_MAP_CENTER,
            map_zoom: DEFAULT_MAP_ZOOM,
            offline: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.directions_base_url = base_url.into();
        self
    }

    pub fn with_route_option(mut self, option: RouteOption) -> Self {
        self.route_option = option;
        self
    }

    pub fn with_default_speed(mut self, speed_kmh: f64) -> Self {
        self.default_speed_kmh = speed_kmh;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_map_view(mut self, center: Coordinate, zoom: u8) -> Self {
        self.map_center = center;
        self.map_zoom = zoom;
        self
    }

    /// Clamp every field into its supported range.
    pub fn normalized(mut self) -> Self {
        self.default_speed_kmh = if self.default_speed_kmh.is_finite() {
            self.default_speed_kmh.clamp(MIN_SPEED_KMH, MAX_SPEED_KMH)
        } else {
            DEFAULT_SPEED_KMH
        };
        self.map_zoom = self.map_zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.route_cache_capacity = self.route_cache_capacity.max(1);
        let trimmed = self.directions_base_url.trim().trim_end_matches('/');
        self.directions_base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Apply `ROUTE_SIM_API_BASE_URL` / `ROUTE_SIM_OFFLINE` from the process environment.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE_URL).filter(|value| !value.trim().is_empty()) {
            debug!(%base_url, "directions base URL overridden from environment");
            self.directions_base_url = base_url;
        }
        if let Some(offline) = lookup(ENV_OFFLINE) {
            self.offline = matches!(
                offline.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        self
    }
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SimulationConfig::default());
        }
        Err(error) => {
            return Err(ConfigError::Io(format!(
                "failed to read {}: {error}",
                path.display()
            )))
        }
    };
    serde_json::from_str(&contents).map_err(|error| {
        ConfigError::InvalidFormat(format!("invalid config {}: {error}", path.display()))
    })
}

pub fn save_config(path: &Path, config: &SimulationConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            ConfigError::Io(format!("failed to create {}: {error}", parent.display()))
        })?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|error| ConfigError::InvalidFormat(error.to_string()))?;
    fs::write(path, json)
        .map_err(|error| ConfigError::Io(format!("failed to write {}: {error}", path.display())))
}

/// Load, apply environment overrides, and normalize.
pub fn resolve_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    Ok(load_config(path)?.apply_env_overrides().normalized())
}
