//! Derived, display-ready statistics for the simulation panel.

/// Snapshot of distances and times at the current progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationStats {
    pub total_distance_km: f64,
    pub traveled_km: f64,
    pub remaining_km: f64,
    pub elapsed_secs: f64,
    pub total_secs: f64,
    pub progress_percent: f64,
}

impl SimulationStats {
    pub fn new(
        total_distance_km: f64,
        progress_percent: f64,
        elapsed_secs: f64,
        total_secs: f64,
    ) -> Self {
        let traveled_km = total_distance_km * progress_percent / 100.0;
        Self {
            total_distance_km,
            traveled_km,
            remaining_km: (total_distance_km - traveled_km).max(0.0),
            elapsed_secs,
            total_secs,
            progress_percent,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.elapsed_secs)
    }

    pub fn total_label(&self) -> String {
        format_time(self.total_secs)
    }
}

/// `45s`, `2m 5s`, `1h 2m 5s`. Seconds are floored; a lower unit is shown
/// whenever a higher unit is non-zero.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hrs = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hrs > 0 {
        format!("{hrs}h {mins}m {secs}s")
    } else if mins > 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

pub fn format_distance_km(km: f64) -> String {
    format!("{km:.2} km")
}
