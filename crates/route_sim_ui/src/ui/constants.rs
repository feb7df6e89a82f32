//! Colors and sizes used throughout the UI.

use eframe::egui::Color32;

pub const START_MARKER_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
pub const END_MARKER_COLOR: Color32 = Color32::from_rgb(218, 54, 51);
pub const CURRENT_MARKER_COLOR: Color32 = Color32::from_rgb(31, 111, 235);
pub const ROUTE_COLOR: Color32 = Color32::from_rgb(66, 133, 244);
pub const GRID_COLOR: Color32 = Color32::from_gray(40);
pub const MAP_BACKGROUND: Color32 = Color32::from_gray(18);

pub const MARKER_RADIUS: f32 = 6.0;
pub const CURRENT_MARKER_RADIUS: f32 = 8.0;
pub const ROUTE_WIDTH: f32 = 4.0;
pub const PROGRESS_BAR_HEIGHT: f32 = 14.0;
