//! Input-boundary sanitizing for user-entered values.

/// Slowest allowed target speed.
pub const MIN_SPEED_KMH: f64 = 1.0;
/// Upper bound of the speed slider.
pub const MAX_SPEED_KMH: f64 = 200.0;
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Clamp a speed to at least [`MIN_SPEED_KMH`]; non-finite values become the minimum.
pub fn sanitize_speed_kmh(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_SPEED_KMH)
    } else {
        MIN_SPEED_KMH
    }
}

/// Parse the numeric speed field into the slider range. Anything unparseable
/// falls back to the minimum; `inf` saturates at the maximum.
pub fn parse_speed_input(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value.clamp(MIN_SPEED_KMH, MAX_SPEED_KMH),
        _ => MIN_SPEED_KMH,
    }
}

/// Convert a pointer offset on the progress bar into a clamped percentage.
pub fn progress_from_pointer(offset_px: f32, width_px: f32) -> f64 {
    if width_px <= 0.0 || !offset_px.is_finite() {
        return 0.0;
    }
    (f64::from(offset_px) / f64::from(width_px) * 100.0).clamp(0.0, 100.0)
}
