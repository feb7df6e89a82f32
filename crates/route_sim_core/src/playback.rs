//! Playback clock: advances a 0–100 % progress value over the time it takes to
//! cover the route at the configured speed.
//!
//! Canonical state is `elapsed_secs` plus `progress_percent`. The wall-clock
//! origin only exists while [`PlaybackState::Playing`] and is always derived as
//! `now - elapsed`, so pausing, resuming, seeking and speed changes are plain
//! re-basing operations. Because the origin lives inside the playing phase,
//! there is never more than one timeline driving progress: ticks in any other
//! phase are no-ops.

use std::time::Duration;

use tracing::debug;

use crate::input::sanitize_speed_kmh;

/// Externally visible playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Playing { origin_secs: f64 },
    Paused,
    Completed,
}

/// Result of a single [`PlaybackClock::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The clock is not playing; nothing changed.
    Stopped,
    Advanced { progress_percent: f64 },
    /// Progress reached 100 % on this tick.
    Completed,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    phase: Phase,
    elapsed_secs: f64,
    progress_percent: f64,
    total_distance_m: Option<f64>,
    speed_kmh: f64,
}

fn secs(now: Duration) -> f64 {
    now.as_secs_f64()
}

impl PlaybackClock {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            phase: Phase::Idle,
            elapsed_secs: 0.0,
            progress_percent: 0.0,
            total_distance_m: None,
            speed_kmh: sanitize_speed_kmh(speed_kmh),
        }
    }

    pub fn state(&self) -> PlaybackState {
        match self.phase {
            Phase::Idle => PlaybackState::Idle,
            Phase::Playing { .. } => PlaybackState::Playing,
            Phase::Paused => PlaybackState::Paused,
            Phase::Completed => PlaybackState::Completed,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing { .. })
    }

    pub fn has_route(&self) -> bool {
        self.total_distance_m.is_some()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m.unwrap_or(0.0)
    }

    /// Distance covered at the current progress.
    pub fn traveled_distance_m(&self) -> f64 {
        self.total_distance_m() * self.progress_percent / 100.0
    }

    /// Time needed to cover the whole route at the current speed.
    pub fn total_duration_secs(&self) -> f64 {
        (self.total_distance_m() / 1000.0 / self.speed_kmh) * 3600.0
    }

    /// Attach a freshly resolved route; playback returns to `Idle`.
    pub fn load_route(&mut self, total_distance_m: f64) {
        self.total_distance_m = Some(total_distance_m.max(0.0));
        self.reset();
    }

    pub fn clear_route(&mut self) {
        self.total_distance_m = None;
        self.reset();
    }

    /// Start or resume playback. A completed clock replays from 0.
    ///
    /// Returns `false` (and does nothing) when no route is loaded.
    pub fn start(&mut self, now: Duration) -> bool {
        if !self.has_route() {
            return false;
        }
        match self.phase {
            Phase::Playing { .. } => return true,
            Phase::Completed => {
                self.progress_percent = 0.0;
                self.elapsed_secs = 0.0;
            }
            Phase::Idle | Phase::Paused => {}
        }

        let duration = self.total_duration_secs();
        if duration <= 0.0 {
            self.progress_percent = 100.0;
            self.elapsed_secs = 0.0;
            self.phase = Phase::Completed;
            debug!("zero-length route completed immediately");
            return true;
        }

        self.phase = Phase::Playing {
            origin_secs: secs(now) - self.elapsed_secs,
        };
        debug!(
            elapsed_secs = self.elapsed_secs,
            duration_secs = duration,
            "playback started"
        );
        true
    }

    /// Freeze elapsed time. Returns `false` if the clock was not playing.
    pub fn pause(&mut self, now: Duration) -> bool {
        let Phase::Playing { origin_secs } = self.phase else {
            return false;
        };
        if self.advance(now, origin_secs) == TickOutcome::Completed {
            return false;
        }
        self.phase = Phase::Paused;
        debug!(elapsed_secs = self.elapsed_secs, "playback paused");
        true
    }

    /// Jump to `percent` (clamped to `[0, 100]`).
    ///
    /// While playing, the origin is re-based so playback continues smoothly
    /// from the new point. From `Idle` or `Completed` the clock parks in
    /// `Paused` at the new point (or `Idle` at 0). Seeking to 100 completes.
    pub fn seek(&mut self, percent: f64, now: Duration) -> bool {
        if !self.has_route() {
            return false;
        }
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let duration = self.total_duration_secs();
        self.progress_percent = percent;
        self.elapsed_secs = percent / 100.0 * duration;

        if percent >= 100.0 {
            self.phase = Phase::Completed;
            return true;
        }

        self.phase = match self.phase {
            Phase::Playing { .. } => Phase::Playing {
                origin_secs: secs(now) - self.elapsed_secs,
            },
            Phase::Paused => Phase::Paused,
            Phase::Idle | Phase::Completed if percent > 0.0 => Phase::Paused,
            Phase::Idle | Phase::Completed => Phase::Idle,
        };
        true
    }

    /// Advance progress from the wall clock. Only has an effect while playing.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        match self.phase {
            Phase::Playing { origin_secs } => self.advance(now, origin_secs),
            _ => TickOutcome::Stopped,
        }
    }

    /// Change the target speed, preserving the distance already traveled.
    pub fn set_speed(&mut self, speed_kmh: f64, now: Duration) {
        if let Phase::Playing { origin_secs } = self.phase {
            self.advance(now, origin_secs);
        }

        self.speed_kmh = sanitize_speed_kmh(speed_kmh);
        self.elapsed_secs = self.progress_percent / 100.0 * self.total_duration_secs();

        if let Phase::Playing { .. } = self.phase {
            self.phase = Phase::Playing {
                origin_secs: secs(now) - self.elapsed_secs,
            };
        }
        debug!(speed_kmh = self.speed_kmh, "playback speed changed");
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.progress_percent = 0.0;
        self.elapsed_secs = 0.0;
    }

    fn advance(&mut self, now: Duration, origin_secs: f64) -> TickOutcome {
        let duration = self.total_duration_secs();
        let elapsed = (secs(now) - origin_secs).max(self.elapsed_secs);
        let progress = if duration > 0.0 {
            (elapsed / duration * 100.0).min(100.0)
        } else {
            100.0
        };

        if progress >= 100.0 {
            self.progress_percent = 100.0;
            self.elapsed_secs = duration;
            self.phase = Phase::Completed;
            debug!(duration_secs = duration, "playback completed");
            return TickOutcome::Completed;
        }

        self.progress_percent = progress;
        self.elapsed_secs = elapsed;
        TickOutcome::Advanced {
            progress_percent: progress,
        }
    }
}
