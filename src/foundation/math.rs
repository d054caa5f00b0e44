pub(crate) const FULL_TURN_DEG: f64 = 360.0;

/// Wrap an angle in degrees into `[0, 360)`.
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

/// Linear interpolation between two scalars.
pub(crate) fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalized position of `elapsed` inside `[0, duration]`, clamped to `[0, 1]`.
///
/// A zero duration is treated as already finished.
pub(crate) fn unit_progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    ((elapsed_ms as f64) / (duration_ms as f64)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
