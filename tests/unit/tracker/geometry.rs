use super::*;

#[test]
fn visible_fraction_partial_full_and_none() {
    let s = SectionBounds::new("about", 1000.0, 800.0).unwrap();
    assert_eq!(s.visible_fraction(&Viewport::new(0.0, 800.0)), 0.0);
    assert_eq!(s.visible_fraction(&Viewport::new(600.0, 800.0)), 0.5);
    assert_eq!(s.visible_fraction(&Viewport::new(1000.0, 800.0)), 1.0);
    assert_eq!(s.visible_fraction(&Viewport::new(900.0, 2000.0)), 1.0);
    assert_eq!(s.visible_fraction(&Viewport::new(2000.0, 800.0)), 0.0);
}

#[test]
fn zero_height_sections_are_invisible() {
    let s = SectionBounds::new("spacer", 10.0, 0.0).unwrap();
    assert_eq!(s.visible_fraction(&Viewport::new(0.0, 100.0)), 0.0);
}

#[test]
fn invalid_bounds_are_rejected() {
    assert!(SectionBounds::new("x", 0.0, -1.0).is_err());
    assert!(SectionBounds::new("x", f64::NAN, 10.0).is_err());
}

#[test]
fn stacking_accumulates_tops() {
    let s = stack_sections([("home", 900.0), ("about", 600.0), ("contact", 400.0)]).unwrap();
    assert_eq!(s[1].top, 900.0);
    assert_eq!(s[2].top, 1500.0);
    assert_eq!(document_height(&s), 1900.0);
    assert_eq!(s[2].to_rect(1280.0).height(), 400.0);
}
