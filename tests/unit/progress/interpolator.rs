use super::*;
use crate::state::field::{StateField, field};

fn start(
    ev: &EventLoop,
    config: LoadProgressConfig,
) -> (LoadProgress, StateField<f64>, StateField<bool>) {
    let (pw, pr) = field("loadProgress", 0.0);
    let (rw, rr) = field("isReady", false);
    let lp = LoadProgress::start(
        ev,
        config,
        ProgressWriters {
            progress: pw,
            ready: rw,
        },
    )
    .unwrap();
    (lp, pr, rr)
}

#[test]
fn ramp_is_linear_and_lands_on_exactly_100() {
    let ramp = ProgressRamp::new(Millis(2000), Ease::Linear).unwrap();
    assert_eq!(ramp.value_at(Millis(0)), 0.0);
    assert_eq!(ramp.value_at(Millis(1000)), 50.0);
    assert_eq!(ramp.value_at(Millis(2000)), 100.0);
    assert_eq!(ramp.value_at(Millis(60_000)), 100.0);
}

#[test]
fn overshooting_or_zero_length_ramps_are_rejected() {
    assert!(ProgressRamp::new(Millis(0), Ease::Linear).is_err());
    assert!(ProgressRamp::new(Millis(100), Ease::OutBack).is_err());
    let cfg = LoadProgressConfig {
        tick_ms: 0,
        ..LoadProgressConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn progress_is_monotonic_and_capped() {
    for ease in [Ease::Linear, Ease::OutCubic, Ease::InOutQuad] {
        let ev = EventLoop::new();
        let cfg = LoadProgressConfig {
            duration_ms: 1000,
            tick_ms: 7,
            display_delay_ms: 0,
            ease,
        };
        let (_lp, progress, _) = start(&ev, cfg);
        let mut prev = progress.get();
        for _ in 0..200 {
            ev.advance_by(Millis(9));
            let now = progress.get();
            assert!(now >= prev, "{ease:?}: {now} < {prev}");
            assert!(now <= PROGRESS_MAX);
            prev = now;
        }
        assert_eq!(prev, PROGRESS_MAX);
    }
}

#[test]
fn ready_only_after_100_and_display_delay() {
    let ev = EventLoop::new();
    let cfg = LoadProgressConfig {
        duration_ms: 1000,
        tick_ms: 50,
        display_delay_ms: 300,
        ease: Ease::Linear,
    };
    let (lp, progress, ready) = start(&ev, cfg);

    ev.advance_to(Millis(950));
    assert_eq!(lp.phase(), LoadPhase::Loading);
    assert!(progress.get() < PROGRESS_MAX);

    ev.advance_to(Millis(1000));
    assert_eq!(progress.get(), PROGRESS_MAX);
    assert_eq!(lp.phase(), LoadPhase::Complete);
    assert!(!ready.get());

    ev.advance_to(Millis(1250));
    assert!(!ready.get());
    ev.advance_to(Millis(1300));
    assert!(ready.get());
    assert_eq!(lp.phase(), LoadPhase::Ready);
    assert!(!lp.is_ticking());
    assert_eq!(ready.writes(), 1);

    let writes = progress.writes();
    ev.advance_by(Millis(5000));
    assert_eq!(progress.writes(), writes);
    assert!(ready.get());
}

#[test]
fn cancel_mid_ramp_stops_all_writes() {
    let ev = EventLoop::new();
    let (lp, progress, ready) = start(&ev, LoadProgressConfig::default());
    ev.advance_to(Millis(1000));
    assert!(progress.writes() > 0);
    let p_writes = progress.writes();
    let r_writes = ready.writes();
    let value = progress.get();

    lp.cancel();
    assert_eq!(ev.pending(), 0);
    ev.advance_by(Millis(10_000));
    assert_eq!(progress.writes(), p_writes);
    assert_eq!(ready.writes(), r_writes);
    assert_eq!(progress.get(), value);
    assert!(!ready.get());
}

#[test]
fn ramp_starts_at_loop_time() {
    let ev = EventLoop::new();
    ev.advance_to(Millis(5000));
    let cfg = LoadProgressConfig {
        duration_ms: 1000,
        tick_ms: 100,
        display_delay_ms: 0,
        ease: Ease::Linear,
    };
    let (lp, progress, _) = start(&ev, cfg);
    ev.advance_by(Millis(500));
    assert_eq!(progress.get(), 50.0);
    assert_eq!(lp.value(), 50.0);
}

#[test]
fn indicator_helpers() {
    assert_eq!(bar_width_percent(140.0), 100.0);
    assert_eq!(bar_width_percent(-3.0), 0.0);
    let r = 10.0;
    let full = std::f64::consts::TAU * r;
    assert!((stroke_dash_offset(0.0, r) - full).abs() < 1e-9);
    assert!((stroke_dash_offset(50.0, r) - full / 2.0).abs() < 1e-9);
    assert_eq!(stroke_dash_offset(100.0, r), 0.0);
}
