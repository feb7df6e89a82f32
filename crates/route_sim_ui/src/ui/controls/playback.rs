use eframe::egui;

use route_sim_core::input::{parse_speed_input, progress_from_pointer, MAX_SPEED_KMH, MIN_SPEED_KMH};
use route_sim_core::stats::format_distance_km;

use crate::app::SimUiApp;
use crate::ui::constants::{CURRENT_MARKER_COLOR, PROGRESS_BAR_HEIGHT};

pub(super) fn render_playback_controls(ui: &mut egui::Ui, app: &mut SimUiApp) {
    ui.horizontal(|ui| {
        let can_play = !app.controller.route().is_empty() && !app.controller.is_loading();
        if ui
            .add_enabled(can_play, egui::Button::new(app.controller.playback_label()))
            .clicked()
        {
            app.controller.toggle_playback();
        }
        if ui
            .add_enabled(!app.controller.route().is_empty(), egui::Button::new("Reset"))
            .clicked()
        {
            app.controller.reset();
        }

        ui.separator();
        ui.label("Speed");
        let mut speed = app.controller.speed_kmh();
        let slider = ui.add(
            egui::Slider::new(&mut speed, MIN_SPEED_KMH..=MAX_SPEED_KMH)
                .step_by(1.0)
                .show_value(false),
        );
        if slider.changed() {
            app.set_speed(speed);
        }
        let field = ui.add(egui::TextEdit::singleline(&mut app.speed_text).desired_width(48.0));
        if field.lost_focus() {
            let parsed = parse_speed_input(&app.speed_text);
            app.set_speed(parsed);
        }
        ui.label("km/h");
    });
}

/// Progress bar that seeks on click and scrubs while dragged.
pub(super) fn render_progress(ui: &mut egui::Ui, app: &mut SimUiApp) {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, PROGRESS_BAR_HEIGHT),
        egui::Sense::click_and_drag(),
    );

    let pointer_percent = response
        .interact_pointer_pos()
        .map(|pos| progress_from_pointer(pos.x - rect.left(), rect.width()));

    if response.drag_started() {
        app.controller.begin_seek_drag();
    }
    if response.dragged() || response.clicked() {
        if let Some(percent) = pointer_percent {
            app.controller.drag_seek(percent);
        }
    }
    if response.drag_stopped() {
        app.controller.end_seek_drag();
    }

    let visuals = ui.visuals();
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, visuals.extreme_bg_color);
    let filled = rect.width() * (app.controller.progress_percent() / 100.0) as f32;
    let fill_rect = egui::Rect::from_min_size(rect.min, egui::vec2(filled, rect.height()));
    painter.rect_filled(fill_rect, 4.0, CURRENT_MARKER_COLOR);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("{:.1}%", app.controller.progress_percent()),
        egui::FontId::monospace(10.0),
        visuals.strong_text_color(),
    );
}

pub(super) fn render_stats(ui: &mut egui::Ui, app: &SimUiApp) {
    if app.controller.route().is_empty() {
        return;
    }
    let stats = app.controller.stats();
    ui.horizontal(|ui| {
        ui.label(format!("Distance: {}", format_distance_km(stats.total_distance_km)));
        ui.label(format!("Traveled: {}", format_distance_km(stats.traveled_km)));
        ui.label(format!("Remaining: {}", format_distance_km(stats.remaining_km)));
        ui.label(format!(
            "Time: {} / {}",
            stats.elapsed_label(),
            stats.total_label()
        ));
    });
}
