//! Application state for the UI: the simulation controller plus the
//! background route fetcher and map viewport.

use std::path::PathBuf;

use tracing::{info, warn};

use route_sim_core::config::{resolve_config, save_config, SimulationConfig, CONFIG_FILE_NAME};
use route_sim_core::controller::SimulationController;
use route_sim_core::directions::{build_directions_provider, RouteFetchWorker, RouteRequest};
use route_sim_core::overlay::OverlaySet;
use route_sim_core::time::MonotonicTime;

mod map_view;

pub use map_view::MapView;

/// Main application state for the simulation UI.
pub struct SimUiApp {
    pub controller: SimulationController<MonotonicTime, OverlaySet>,
    pub worker: RouteFetchWorker,
    pub map_view: MapView,
    /// Text buffer behind the numeric speed field.
    pub speed_text: String,
    pub config: SimulationConfig,
    pub config_path: PathBuf,
    /// Result of the last settings save, shown in the status line.
    pub status_message: Option<String>,
}

impl SimUiApp {
    pub fn new() -> Self {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);
        let config = resolve_config(&config_path).unwrap_or_else(|err| {
            warn!(error = %err, path = %config_path.display(), "config unreadable, using defaults");
            SimulationConfig::default().apply_env_overrides().normalized()
        });
        Self::with_config(config, config_path)
    }

    pub fn with_config(config: SimulationConfig, config_path: PathBuf) -> Self {
        info!(
            base_url = %config.directions_base_url,
            offline = config.offline,
            "starting route simulation UI"
        );
        let provider = build_directions_provider(&config);
        let controller =
            SimulationController::from_config(MonotonicTime::new(), OverlaySet::new(), &config);
        Self {
            speed_text: format_speed(controller.speed_kmh()),
            controller,
            worker: RouteFetchWorker::new(provider),
            map_view: MapView::new(config.map_center, config.map_zoom),
            config,
            config_path,
            status_message: None,
        }
    }

    /// Hand a route request (if any) to the background worker.
    pub fn submit(&mut self, request: Option<RouteRequest>) {
        if let Some(request) = request {
            self.worker.submit(request);
        }
    }

    /// Apply every route that arrived since the last frame.
    pub fn poll_routes(&mut self) {
        for resolution in self.worker.drain() {
            self.controller.apply_route(resolution);
        }
    }

    pub fn set_speed(&mut self, speed_kmh: f64) {
        self.controller.set_speed(speed_kmh);
        self.speed_text = format_speed(self.controller.speed_kmh());
    }

    /// Persist the current speed, route option, and viewport as the new defaults.
    pub fn save_settings(&mut self) {
        self.config = self
            .config
            .clone()
            .with_default_speed(self.controller.speed_kmh())
            .with_route_option(self.controller.route_option())
            .with_map_view(self.map_view.center(), self.map_view.zoom())
            .normalized();
        self.status_message = Some(match save_config(&self.config_path, &self.config) {
            Ok(()) => format!("Saved settings to {}", self.config_path.display()),
            Err(err) => {
                warn!(error = %err, "failed to save settings");
                format!("Could not save settings: {err}")
            }
        });
    }

    /// Whether the UI needs to keep repainting without input.
    pub fn needs_animation(&self) -> bool {
        self.controller.is_playing() || self.worker.inflight() > 0
    }
}

impl Default for SimUiApp {
    fn default() -> Self {
        Self::new()
    }
}

fn format_speed(speed_kmh: f64) -> String {
    format!("{speed_kmh:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_sim_core::geo::Coordinate;

    fn offline_app() -> SimUiApp {
        let config = SimulationConfig::default().with_offline(true);
        SimUiApp::with_config(config, PathBuf::from("unused.json"))
    }

    #[test]
    fn offline_app_resolves_straight_line_through_worker() {
        let mut app = offline_app();
        app.controller.set_start_point(Coordinate::new(37.5, 127.0));
        let request = app.controller.set_end_point(Coordinate::new(37.5, 127.01));
        app.submit(request);

        let resolution = app.worker.wait().expect("one fetch in flight");
        assert!(app.controller.apply_route(resolution));
        assert_eq!(app.controller.route().len(), 2);
        assert_eq!(app.controller.route_warning(), Some("offline mode"));
        assert!(!app.needs_animation());
    }

    #[test]
    fn speed_text_follows_sanitized_speed() {
        let mut app = offline_app();
        assert_eq!(app.speed_text, "60");
        app.set_speed(0.0);
        assert_eq!(app.speed_text, "1");
        app.set_speed(135.4);
        assert_eq!(app.speed_text, "135");
    }

    #[test]
    fn save_settings_writes_current_view() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut app = SimUiApp::with_config(SimulationConfig::default().with_offline(true), path.clone());
        app.set_speed(90.0);
        app.map_view.zoom_in();
        app.save_settings();

        let saved = route_sim_core::config::load_config(&path).expect("saved config");
        assert_eq!(saved.default_speed_kmh, 90.0);
        assert_eq!(saved.map_zoom, 14);
        assert!(saved.offline);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|message| message.starts_with("Saved")));
    }
}
