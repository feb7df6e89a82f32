//! Web-Mercator viewport: a center coordinate plus an integer zoom level,
//! projected onto a screen rectangle.

use std::f64::consts::PI;

use eframe::egui;

use route_sim_core::config::{MAX_MAP_ZOOM, MIN_MAP_ZOOM};
use route_sim_core::geo::Coordinate;

const TILE_SIZE_PX: f64 = 256.0;
const MAX_MERCATOR_LAT: f64 = 85.05112878;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: Coordinate,
    zoom: u8,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_MAP_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_MAP_ZOOM);
    }

    /// Screen position of `coord` inside `rect`.
    pub fn project(&self, coord: Coordinate, rect: egui::Rect) -> egui::Pos2 {
        let (cx, cy) = world_px(self.center, self.zoom);
        let (x, y) = world_px(coord, self.zoom);
        rect.center() + egui::vec2((x - cx) as f32, (y - cy) as f32)
    }

    /// Coordinate under the screen position `pos` inside `rect`.
    pub fn unproject(&self, pos: egui::Pos2, rect: egui::Rect) -> Coordinate {
        let (cx, cy) = world_px(self.center, self.zoom);
        let offset = pos - rect.center();
        from_world_px(cx + offset.x as f64, cy + offset.y as f64, self.zoom)
    }

    /// Move the view so the content follows a pointer drag of `delta` pixels.
    pub fn pan_by(&mut self, delta: egui::Vec2) {
        let (cx, cy) = world_px(self.center, self.zoom);
        self.center = from_world_px(cx - delta.x as f64, cy - delta.y as f64, self.zoom);
    }

    /// Approximate ground distance covered by one screen pixel at the center.
    pub fn meters_per_pixel(&self) -> f64 {
        let earth_circumference_m = 2.0 * PI * 6_378_137.0;
        earth_circumference_m * self.center.lat.to_radians().cos() / world_size(self.zoom)
    }
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE_PX * f64::from(1u32 << zoom)
}

fn world_px(coord: Coordinate, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coord
        .lat
        .clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
        .to_radians();
    let x = (coord.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) * 0.5 * size;
    (x, y)
}

fn from_world_px(x: f64, y: f64, zoom: u8) -> Coordinate {
    let size = world_size(zoom);
    let lng = x / size * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
    Coordinate::new(lat, lng)
}
