use super::*;

#[test]
fn wrap_degrees_stays_in_half_open_turn() {
    assert_eq!(wrap_degrees(0.0), 0.0);
    assert_eq!(wrap_degrees(360.0), 0.0);
    assert_eq!(wrap_degrees(450.0), 90.0);
    assert_eq!(wrap_degrees(-90.0), 270.0);
    let tiny = wrap_degrees(-1e-14);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn unit_progress_clamps_and_handles_zero_duration() {
    assert_eq!(unit_progress(0, 1000), 0.0);
    assert_eq!(unit_progress(500, 1000), 0.5);
    assert_eq!(unit_progress(5000, 1000), 1.0);
    assert_eq!(unit_progress(0, 0), 1.0);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp_f64(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp_f64(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp_f64(2.0, 6.0, 0.25), 3.0);
}
