use super::*;

#[test]
fn linear_tween_interpolates_and_lands_exactly() {
    let tw = Tween::new(0.0, 100.0, Millis(1000), Ease::Linear);
    assert_eq!(tw.sample(Millis(0)), 0.0);
    assert_eq!(tw.sample(Millis(250)), 25.0);
    assert_eq!(tw.sample(Millis(1000)), 100.0);
    assert_eq!(tw.sample(Millis(9000)), 100.0);
}

#[test]
fn eased_tween_follows_the_curve() {
    let tw = Tween::new(10.0, 20.0, Millis(100), Ease::InQuad);
    assert_eq!(tw.progress(Millis(50)), 0.25);
    assert_eq!(tw.sample(Millis(50)), 12.5);
    assert_eq!(tw.sample(Millis(100)), 20.0);
}

#[test]
fn overshooting_curve_passes_the_target_before_landing() {
    let tw = Tween::new(0.0, 1.0, Millis(1000), Ease::OutBack);
    let peak = (1..1000)
        .map(|ms| tw.sample(Millis(ms)))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert_eq!(tw.sample(Millis(1000)), 1.0);
}

#[test]
fn zero_duration_jumps_to_end() {
    let tw = Tween::new(0.0, 1.0, Millis::ZERO, Ease::Linear);
    assert_eq!(tw.sample(Millis::ZERO), 1.0);
}

#[test]
fn stagger_spaces_delays_evenly() {
    let delays = stagger(4, Millis(200), Millis(100));
    assert_eq!(delays, vec![Millis(200), Millis(300), Millis(400), Millis(500)]);
    assert!(stagger(0, Millis(0), Millis(100)).is_empty());
}
