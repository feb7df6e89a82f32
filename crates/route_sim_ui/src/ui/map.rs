//! Painter-based map: a coordinate grid, the route polyline, and the three
//! markers, drawn from the controller's overlay set.

use eframe::egui::{self, Align2, Color32, FontId, Vec2};

use route_sim_core::config::MIN_MAP_ZOOM;
use route_sim_core::geo::Coordinate;
use route_sim_core::overlay::{Overlay, OverlayKind};

use crate::app::{MapView, SimUiApp};
use crate::ui::constants::{
    CURRENT_MARKER_COLOR, CURRENT_MARKER_RADIUS, END_MARKER_COLOR, GRID_COLOR, MAP_BACKGROUND,
    MARKER_RADIUS, ROUTE_COLOR, ROUTE_WIDTH, START_MARKER_COLOR,
};

pub fn render_map(ui: &mut egui::Ui, app: &mut SimUiApp) {
    let viewport_size = ui.available_size();
    ui.horizontal(|ui| {
        if ui.button("+").clicked() {
            app.map_view.zoom_in();
        }
        if ui.button("-").clicked() {
            app.map_view.zoom_out();
        }
        if ui
            .add_enabled(!app.controller.route().is_empty(), egui::Button::new("Fit route"))
            .clicked()
        {
            fit_route(app, viewport_size);
        }
        ui.label(format!(
            "Zoom {} | {:.1} m/px",
            app.map_view.zoom(),
            app.map_view.meters_per_pixel()
        ));
    });

    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;

    handle_map_input(ui, app, &response);

    painter.rect_filled(rect, 0.0, MAP_BACKGROUND);
    draw_grid(&painter, &app.map_view, rect);

    let overlays = app.controller.overlays();
    if let Some(path) = overlays.polyline() {
        let points: Vec<egui::Pos2> = path
            .iter()
            .map(|coord| app.map_view.project(*coord, rect))
            .collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(ROUTE_WIDTH, ROUTE_COLOR),
        ));
    }

    for kind in OverlayKind::ALL {
        if let Some(Overlay::Marker { position, label }) = overlays.get(kind) {
            let (color, radius) = marker_style(kind);
            draw_marker(&painter, app.map_view.project(*position, rect), label, color, radius);
        }
    }

    if app.controller.start_point().is_none() && app.controller.end_point().is_none() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Use \"Pick start\" and \"Pick end\", then click the map",
            FontId::proportional(14.0),
            Color32::from_gray(160),
        );
    }
}

fn handle_map_input(ui: &egui::Ui, app: &mut SimUiApp, response: &egui::Response) {
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let coord = app.map_view.unproject(pos, response.rect);
            let request = app.controller.handle_map_click(coord);
            app.submit(request);
        }
    }
    if response.dragged() {
        app.map_view.pan_by(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll > 0.0 {
            app.map_view.zoom_in();
        } else if scroll < 0.0 {
            app.map_view.zoom_out();
        }
    }
}

const FIT_MAX_ZOOM: u8 = 17;

/// Center on the route midpoint and pick the closest zoom that fits it.
fn fit_route(app: &mut SimUiApp, viewport_size: Vec2) {
    let path = app.controller.route().path();
    let Some(first) = path.first() else {
        return;
    };
    let (mut lat_min, mut lat_max, mut lng_min, mut lng_max) =
        (first.lat, first.lat, first.lng, first.lng);
    for coord in &path {
        lat_min = lat_min.min(coord.lat);
        lat_max = lat_max.max(coord.lat);
        lng_min = lng_min.min(coord.lng);
        lng_max = lng_max.max(coord.lng);
    }
    let center = Coordinate::new(
        (lat_min + lat_max) * 0.5,
        (lng_min + lng_max) * 0.5,
    );
    app.map_view = MapView::new(center, FIT_MAX_ZOOM);

    let viewport = egui::Rect::from_min_size(egui::Pos2::ZERO, viewport_size);
    let fits = |view: &MapView| {
        let a = view.project(Coordinate::new(lat_max, lng_min), viewport);
        let b = view.project(Coordinate::new(lat_min, lng_max), viewport);
        viewport.contains(a) && viewport.contains(b)
    };
    while !fits(&app.map_view) && app.map_view.zoom() > MIN_MAP_ZOOM {
        app.map_view.zoom_out();
    }
}

fn marker_style(kind: OverlayKind) -> (Color32, f32) {
    match kind {
        OverlayKind::StartMarker => (START_MARKER_COLOR, MARKER_RADIUS),
        OverlayKind::EndMarker => (END_MARKER_COLOR, MARKER_RADIUS),
        OverlayKind::CurrentMarker | OverlayKind::RoutePolyline => {
            (CURRENT_MARKER_COLOR, CURRENT_MARKER_RADIUS)
        }
    }
}

fn draw_marker(painter: &egui::Painter, pos: egui::Pos2, label: &str, color: Color32, radius: f32) {
    painter.circle_filled(pos, radius, color);
    painter.circle_stroke(pos, radius, egui::Stroke::new(1.5, Color32::WHITE));
    painter.text(
        pos + Vec2::new(radius + 4.0, -radius - 4.0),
        Align2::LEFT_TOP,
        label,
        FontId::monospace(11.0),
        color,
    );
}

/// Latitude/longitude lines at a spacing that keeps roughly 100 px between them.
fn draw_grid(painter: &egui::Painter, view: &MapView, rect: egui::Rect) {
    let top_left = view.unproject(rect.left_top(), rect);
    let bottom_right = view.unproject(rect.right_bottom(), rect);
    let span_deg = (bottom_right.lng - top_left.lng).abs();
    let lines_across = (rect.width() / 100.0).max(1.0) as f64;
    let step = nice_step(span_deg / lines_across);
    if step <= 0.0 {
        return;
    }
    let stroke = egui::Stroke::new(1.0, GRID_COLOR);

    let mut lng = (top_left.lng / step).floor() * step;
    while lng <= bottom_right.lng {
        let x = view
            .project(Coordinate::new(view.center().lat, lng), rect)
            .x;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        lng += step;
    }

    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat <= top_left.lat {
        let y = view
            .project(Coordinate::new(lat, view.center().lng), rect)
            .y;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        lat += step;
    }
}

/// Round `raw` up to 1, 2, or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_rounds_up_to_one_two_five() {
        assert!((nice_step(0.0013) - 0.002).abs() < 1e-12);
        assert!((nice_step(0.003) - 0.005).abs() < 1e-12);
        assert!((nice_step(0.07) - 0.1).abs() < 1e-12);
        assert_eq!(nice_step(0.0), 0.0);
        assert_eq!(nice_step(f64::NAN), 0.0);
    }
}
