//! Simulation controller: owns the session state and orchestrates route
//! resolution, the playback clock, and overlay updates.
//!
//! The controller is driven from a single thread. Route fetches are handed out
//! as [`RouteRequest`]s and come back through [`SimulationController::apply_route`];
//! a generation counter plus an endpoint check drops responses that no longer
//! match the current (start, end) pair.

use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::directions::{fetch_now, DirectionsProvider, RouteOption, RouteRequest, RouteResolution};
use crate::geo::Coordinate;
use crate::overlay::{MapOverlays, Overlay, OverlayKind, OverlaySet};
use crate::playback::{PlaybackClock, PlaybackState, TickOutcome};
use crate::route::{resolve_route, Route};
use crate::stats::SimulationStats;
use crate::time::TimeSource;

/// What the next map click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    #[default]
    Off,
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
struct SeekDrag {
    resume: bool,
}

pub struct SimulationController<T: TimeSource, O: MapOverlays = OverlaySet> {
    time: T,
    overlays: O,
    start_point: Option<Coordinate>,
    end_point: Option<Coordinate>,
    route: Route,
    clock: PlaybackClock,
    current_position: Option<Coordinate>,
    route_option: RouteOption,
    generation: u64,
    pending: Option<RouteRequest>,
    route_warning: Option<String>,
    pick_mode: PickMode,
    seek_drag: Option<SeekDrag>,
}

impl<T: TimeSource, O: MapOverlays> SimulationController<T, O> {
    pub fn new(time: T, overlays: O, speed_kmh: f64) -> Self {
        Self {
            time,
            overlays,
            start_point: None,
            end_point: None,
            route: Route::empty(),
            clock: PlaybackClock::new(speed_kmh),
            current_position: None,
            route_option: RouteOption::default(),
            generation: 0,
            pending: None,
            route_warning: None,
            pick_mode: PickMode::Off,
            seek_drag: None,
        }
    }

    pub fn from_config(time: T, overlays: O, config: &SimulationConfig) -> Self {
        let mut controller = Self::new(time, overlays, config.default_speed_kmh);
        controller.route_option = config.route_option;
        controller
    }

    // -- endpoints and route resolution -------------------------------------

    pub fn set_start_point(&mut self, point: Coordinate) -> Option<RouteRequest> {
        info!(lat = point.lat, lng = point.lng, "start point set");
        self.start_point = Some(point);
        self.overlays.upsert(
            OverlayKind::StartMarker,
            Overlay::marker(OverlayKind::StartMarker, point),
        );
        self.request_route()
    }

    pub fn set_end_point(&mut self, point: Coordinate) -> Option<RouteRequest> {
        info!(lat = point.lat, lng = point.lng, "end point set");
        self.end_point = Some(point);
        self.overlays.upsert(
            OverlayKind::EndMarker,
            Overlay::marker(OverlayKind::EndMarker, point),
        );
        self.request_route()
    }

    /// Change the route preference; refetches when both endpoints are set.
    pub fn set_route_option(&mut self, option: RouteOption) -> Option<RouteRequest> {
        if option == self.route_option {
            return None;
        }
        self.route_option = option;
        self.request_route()
    }

    pub fn set_pick_mode(&mut self, mode: PickMode) {
        self.pick_mode = mode;
    }

    /// Route a map click according to the pick mode, then leave pick mode.
    pub fn handle_map_click(&mut self, point: Coordinate) -> Option<RouteRequest> {
        let mode = std::mem::take(&mut self.pick_mode);
        match mode {
            PickMode::Start => self.set_start_point(point),
            PickMode::End => self.set_end_point(point),
            PickMode::Off => None,
        }
    }

    fn request_route(&mut self) -> Option<RouteRequest> {
        let (start, end) = (self.start_point?, self.end_point?);
        self.generation += 1;
        let request = RouteRequest {
            generation: self.generation,
            start,
            end,
            option: self.route_option,
        };
        self.pending = Some(request);
        self.route_warning = None;
        debug!(generation = request.generation, "route requested");
        Some(request)
    }

    /// Install a fetched route. Returns `false` if the resolution is stale.
    ///
    /// Any failure inside the resolution falls back to a straight line and sets
    /// [`route_warning`](Self::route_warning). Playback stops and returns to `Idle`.
    pub fn apply_route(&mut self, resolution: RouteResolution) -> bool {
        let request = resolution.request;
        let is_current = self.pending.is_some_and(|pending| {
            pending.generation == request.generation
                && self.start_point == Some(request.start)
                && self.end_point == Some(request.end)
        });
        if !is_current {
            debug!(
                generation = request.generation,
                current = self.generation,
                "discarding stale route"
            );
            return false;
        }
        self.pending = None;

        let resolved = resolve_route(request.start, request.end, resolution.outcome);
        self.route_warning = resolved.warning;
        self.route = resolved.route;
        self.overlays.upsert(
            OverlayKind::RoutePolyline,
            Overlay::Polyline {
                path: self.route.path(),
            },
        );
        self.clock.load_route(self.route.total_distance_m());
        self.seek_drag = None;
        self.snap_to_start();
        true
    }

    /// Execute `request` synchronously against `provider` and apply it.
    pub fn resolve_with(&mut self, provider: &dyn DirectionsProvider, request: RouteRequest) -> bool {
        self.apply_route(fetch_now(provider, request))
    }

    /// Clear both endpoints, the route, and every overlay.
    pub fn clear_points(&mut self) {
        info!("points cleared");
        self.clock.clear_route();
        self.start_point = None;
        self.end_point = None;
        self.route = Route::empty();
        self.current_position = None;
        self.pending = None;
        self.route_warning = None;
        self.pick_mode = PickMode::Off;
        self.seek_drag = None;
        self.overlays.clear();
    }

    // -- playback ------------------------------------------------------------

    /// Start, resume, or replay. No-op while a route fetch is in flight or
    /// without a route.
    pub fn play(&mut self) -> bool {
        if self.is_loading() || self.route.is_empty() {
            return false;
        }
        let replay = self.clock.state() == PlaybackState::Completed;
        if !self.clock.start(self.time.now()) {
            return false;
        }
        if replay && self.clock.state() == PlaybackState::Playing {
            self.snap_to_start();
        } else {
            self.sync_position();
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.clock.pause(self.time.now());
        self.sync_position();
        paused
    }

    /// The play/pause button.
    pub fn toggle_playback(&mut self) -> bool {
        if self.clock.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Stop and rewind to the start of the loaded route.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.seek_drag = None;
        self.snap_to_start();
    }

    pub fn seek(&mut self, percent: f64) -> bool {
        if self.route.is_empty() {
            return false;
        }
        let moved = self.clock.seek(percent, self.time.now());
        self.sync_position();
        moved
    }

    pub fn set_speed(&mut self, speed_kmh: f64) {
        self.clock.set_speed(speed_kmh, self.time.now());
        self.sync_position();
    }

    /// Advance one animation frame.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.clock.tick(self.time.now());
        if outcome != TickOutcome::Stopped {
            self.sync_position();
        }
        outcome
    }

    /// Pointer pressed on the progress bar: pause, remembering whether to resume.
    pub fn begin_seek_drag(&mut self) {
        if self.route.is_empty() || self.seek_drag.is_some() {
            return;
        }
        let resume = self.clock.is_playing();
        if resume {
            self.pause();
        }
        self.seek_drag = Some(SeekDrag { resume });
    }

    pub fn drag_seek(&mut self, percent: f64) -> bool {
        self.seek(percent)
    }

    /// Pointer released: resume if playback was running when the drag began
    /// and the drag did not end on the finish line.
    pub fn end_seek_drag(&mut self) {
        let Some(drag) = self.seek_drag.take() else {
            return;
        };
        if drag.resume && self.clock.state() != PlaybackState::Completed {
            self.play();
        }
    }

    fn sync_position(&mut self) {
        self.current_position = self
            .route
            .position_at_progress(self.clock.progress_percent());
        self.publish_position();
    }

    /// Marker to the first vertex of the loaded route. A start point picked
    /// while a fetch is pending does not move it until that route applies.
    fn snap_to_start(&mut self) {
        self.current_position = self.route.first();
        self.publish_position();
    }

    fn publish_position(&mut self) {
        match self.current_position {
            Some(position) => self.overlays.upsert(
                OverlayKind::CurrentMarker,
                Overlay::marker(OverlayKind::CurrentMarker, position),
            ),
            None => self.overlays.remove(OverlayKind::CurrentMarker),
        }
    }

    // -- read-only views -----------------------------------------------------

    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn progress_percent(&self) -> f64 {
        self.clock.progress_percent()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.clock.total_duration_secs()
    }

    pub fn speed_kmh(&self) -> f64 {
        self.clock.speed_kmh()
    }

    pub fn current_position(&self) -> Option<Coordinate> {
        self.current_position
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn start_point(&self) -> Option<Coordinate> {
        self.start_point
    }

    pub fn end_point(&self) -> Option<Coordinate> {
        self.end_point
    }

    pub fn route_option(&self) -> RouteOption {
        self.route_option
    }

    /// `true` while a route request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn route_warning(&self) -> Option<&str> {
        self.route_warning.as_deref()
    }

    pub fn pick_mode(&self) -> PickMode {
        self.pick_mode
    }

    pub fn is_seek_dragging(&self) -> bool {
        self.seek_drag.is_some()
    }

    /// Caption for the play/pause button.
    pub fn playback_label(&self) -> &'static str {
        match self.clock.state() {
            PlaybackState::Idle => "Play",
            PlaybackState::Playing => "Pause",
            PlaybackState::Paused => "Resume",
            PlaybackState::Completed => "Replay",
        }
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::new(
            self.route.total_distance_km(),
            self.clock.progress_percent(),
            self.clock.elapsed_secs(),
            self.clock.total_duration_secs(),
        )
    }

    pub fn overlays(&self) -> &O {
        &self.overlays
    }
}
