//! Drive a simulation without a UI: resolve a route, then play it back on a
//! fixed-timestep manual clock and log progress.
//!
//! ```text
//! cargo run -p route_sim_core --example headless_run --features http
//! ROUTE_SIM_OFFLINE=1 cargo run -p route_sim_core --example headless_run
//! ```

use std::path::Path;

use route_sim_core::config::{resolve_config, CONFIG_FILE_NAME};
use route_sim_core::controller::SimulationController;
use route_sim_core::directions::{build_directions_provider, fetch_now};
use route_sim_core::geo::Coordinate;
use route_sim_core::logging::init_tracing;
use route_sim_core::overlay::OverlaySet;
use route_sim_core::playback::TickOutcome;
use route_sim_core::stats::format_distance_km;
use route_sim_core::time::ManualTime;
use tracing::info;

const FRAME_SECS: f64 = 1.0 / 30.0;
const REPORT_EVERY_FRAMES: u32 = 30 * 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("headless_run=info,route_sim_core=info");
    let config = resolve_config(Path::new(CONFIG_FILE_NAME))?;
    let provider = build_directions_provider(&config);

    let time = ManualTime::new();
    let mut controller = SimulationController::from_config(time.clone(), OverlaySet::new(), &config);

    controller.set_start_point(Coordinate::new(37.5665, 126.978));
    if let Some(request) = controller.set_end_point(Coordinate::new(37.5512, 126.9882)) {
        controller.apply_route(fetch_now(provider.as_ref(), request));
    }
    if let Some(warning) = controller.route_warning() {
        info!(warning, "using straight-line route");
    }
    info!(
        distance = %format_distance_km(controller.route().total_distance_km()),
        vertices = controller.route().len(),
        "route ready"
    );

    controller.play();
    let mut frame = 0u32;
    loop {
        time.advance_secs(FRAME_SECS);
        frame += 1;
        match controller.tick() {
            TickOutcome::Completed | TickOutcome::Stopped => break,
            TickOutcome::Advanced { progress_percent } if frame % REPORT_EVERY_FRAMES == 0 => {
                let stats = controller.stats();
                info!(
                    progress = %format!("{progress_percent:.1}%"),
                    elapsed = %stats.elapsed_label(),
                    remaining = %format_distance_km(stats.remaining_km),
                    "playing"
                );
            }
            TickOutcome::Advanced { .. } => {}
        }
    }

    let stats = controller.stats();
    info!(total = %stats.total_label(), "arrived");
    Ok(())
}
