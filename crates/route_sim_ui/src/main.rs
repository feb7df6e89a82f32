mod app;
mod ui;

use route_sim_core::logging::init_tracing;

fn main() -> eframe::Result<()> {
    init_tracing("route_sim_ui=info,route_sim_core=info");
    ui::app_shell::run()
}
