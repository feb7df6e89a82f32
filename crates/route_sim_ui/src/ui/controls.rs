//! Control panel: endpoint picking, playback, speed, progress, and stats.

mod playback;
mod points;

use eframe::egui;

use crate::app::SimUiApp;
use crate::ui::controls::playback::{render_playback_controls, render_progress, render_stats};
use crate::ui::controls::points::{render_point_controls, render_status_line};

pub fn render_control_panel(ui: &mut egui::Ui, app: &mut SimUiApp) {
    render_point_controls(ui, app);
    ui.separator();
    render_playback_controls(ui, app);
    render_progress(ui, app);
    render_stats(ui, app);
    render_status_line(ui, app);
}
