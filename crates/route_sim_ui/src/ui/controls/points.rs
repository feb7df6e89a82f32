use eframe::egui;

use route_sim_core::controller::PickMode;
use route_sim_core::directions::RouteOption;
use route_sim_core::geo::Coordinate;

use crate::app::SimUiApp;

pub(super) fn render_point_controls(ui: &mut egui::Ui, app: &mut SimUiApp) {
    ui.horizontal(|ui| {
        let mode = app.controller.pick_mode();
        if ui
            .selectable_label(mode == PickMode::Start, "Pick start")
            .clicked()
        {
            app.controller.set_pick_mode(toggled(mode, PickMode::Start));
        }
        if ui
            .selectable_label(mode == PickMode::End, "Pick end")
            .clicked()
        {
            app.controller.set_pick_mode(toggled(mode, PickMode::End));
        }
        if ui.button("Reset points").clicked() {
            app.controller.clear_points();
        }

        ui.separator();
        ui.label("Route");
        let mut option = app.controller.route_option();
        egui::ComboBox::from_id_salt("route_option")
            .selected_text(option.as_str())
            .show_ui(ui, |ui| {
                for candidate in RouteOption::ALL {
                    ui.selectable_value(&mut option, candidate, candidate.as_str());
                }
            });
        if option != app.controller.route_option() {
            let request = app.controller.set_route_option(option);
            app.submit(request);
        }

        ui.separator();
        if ui.button("Save settings").clicked() {
            app.save_settings();
        }
    });

    ui.horizontal(|ui| {
        ui.label(format!("Start: {}", describe(app.controller.start_point())));
        ui.label(format!("End: {}", describe(app.controller.end_point())));
        match app.controller.pick_mode() {
            PickMode::Start => {
                ui.label("Click the map to place the start point");
            }
            PickMode::End => {
                ui.label("Click the map to place the end point");
            }
            PickMode::Off => {}
        }
    });
}

pub(super) fn render_status_line(ui: &mut egui::Ui, app: &SimUiApp) {
    if app.controller.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Fetching route...");
        });
    }
    if let Some(warning) = app.controller.route_warning() {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            format!("{warning}. Showing a straight-line route."),
        );
    }
    if let Some(message) = &app.status_message {
        ui.label(message);
    }
}

fn toggled(current: PickMode, requested: PickMode) -> PickMode {
    if current == requested {
        PickMode::Off
    } else {
        requested
    }
}

fn describe(point: Option<Coordinate>) -> String {
    match point {
        Some(point) => format!("{:.5}, {:.5}", point.lat, point.lng),
        None => "not set".to_string(),
    }
}
