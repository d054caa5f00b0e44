use super::*;
use crate::motion::driver::RecordingDriver;
use crate::state::field::{StateField, field};
use crate::tracker::geometry::stack_sections;

fn page() -> Vec<SectionBounds> {
    stack_sections([
        ("home", 900.0),
        ("about", 700.0),
        ("skills", 700.0),
        ("contact", 500.0),
    ])
    .unwrap()
}

fn tracker() -> (ActiveSectionTracker, StateField<SectionId>) {
    let (w, r) = field("activeSection", SectionId::from("home"));
    let t = ActiveSectionTracker::new(page(), None, w, TrackerOptions::default()).unwrap();
    (t, r)
}

fn entered(id: &str) -> IntersectionEvent {
    IntersectionEvent::Entered {
        id: SectionId::from(id),
        ratio: 0.8,
    }
}

fn left(id: &str) -> IntersectionEvent {
    IntersectionEvent::Left {
        id: SectionId::from(id),
        ratio: 0.1,
    }
}

#[test]
fn starts_on_first_or_default_section() {
    let (t, r) = tracker();
    assert_eq!(t.active().as_str(), "home");
    assert_eq!(r.writes(), 0);

    let (w, r) = field("activeSection", SectionId::from("home"));
    let about = SectionId::from("about");
    let t = ActiveSectionTracker::new(page(), Some(&about), w, TrackerOptions::default()).unwrap();
    assert_eq!(t.active(), about);
    assert_eq!(r.get(), about);
}

#[test]
fn rejects_empty_page_and_unknown_default() {
    let (w, _) = field("activeSection", SectionId::from("home"));
    assert!(ActiveSectionTracker::new(Vec::new(), None, w, TrackerOptions::default()).is_err());
    let (w, _) = field("activeSection", SectionId::from("home"));
    let nope = SectionId::from("blog");
    assert!(ActiveSectionTracker::new(page(), Some(&nope), w, TrackerOptions::default()).is_err());
}

#[test]
fn duplicate_section_ids_are_rejected() {
    let (w, _) = field("activeSection", SectionId::from("a"));
    let dup = stack_sections([("a", 100.0), ("a", 100.0)]).unwrap();
    assert!(ActiveSectionTracker::new(dup, None, w, TrackerOptions::default()).is_err());
}

#[test]
fn last_entered_wins_regardless_of_exits() {
    let (t, r) = tracker();
    t.apply(&entered("about"));
    t.apply(&entered("skills"));
    t.apply(&left("about"));
    assert_eq!(r.get().as_str(), "skills");
}

#[test]
fn below_threshold_and_unknown_entries_are_ignored() {
    let (t, r) = tracker();
    t.apply(&IntersectionEvent::Entered {
        id: SectionId::from("about"),
        ratio: 0.2,
    });
    t.apply(&entered("blog"));
    assert_eq!(r.get().as_str(), "home");
    assert_eq!(r.writes(), 0);
}

#[test]
fn scrolling_drives_activation() {
    let (t, r) = tracker();
    t.observe(Viewport::new(0.0, 800.0));
    assert_eq!(r.get().as_str(), "home");
    t.observe(Viewport::new(900.0, 800.0));
    assert_eq!(r.get().as_str(), "about");
    t.observe(Viewport::new(2300.0, 800.0));
    assert_eq!(r.get().as_str(), "contact");
    let seen = t.take_entered();
    assert_eq!(seen.first().map(SectionId::as_str), Some("home"));
    assert!(t.take_entered().is_empty());
}

#[test]
fn scroll_to_known_section_is_immediate() {
    let (t, r) = tracker();
    let mut driver = RecordingDriver::new();
    assert!(t.scroll_to(&SectionId::from("skills"), &mut driver));
    assert_eq!(r.get().as_str(), "skills");
    assert_eq!(driver.scroll_targets(), vec![1600.0 - 80.0]);
}

#[test]
fn scroll_to_top_section_clamps_at_zero() {
    let (t, _) = tracker();
    let mut driver = RecordingDriver::new();
    t.scroll_to(&SectionId::from("home"), &mut driver);
    assert_eq!(driver.scroll_targets(), vec![0.0]);
}

#[test]
fn scroll_to_unknown_section_is_a_no_op() {
    let (t, r) = tracker();
    let mut driver = RecordingDriver::new();
    assert!(!t.scroll_to(&SectionId::from("blog"), &mut driver));
    assert_eq!(r.get().as_str(), "home");
    assert_eq!(r.writes(), 0);
    assert!(driver.commands.is_empty());
}

#[test]
fn removing_the_active_section_falls_back_to_first() {
    let (mut t, r) = tracker();
    t.apply(&entered("skills"));
    assert!(t.remove_section(&SectionId::from("skills")));
    assert_eq!(r.get().as_str(), "home");
    assert!(!t.remove_section(&SectionId::from("skills")));
    assert!(t.section(&SectionId::from("skills")).is_none());

    t.apply(&entered("skills"));
    assert_eq!(r.get().as_str(), "home");
}

#[test]
fn added_sections_are_observed_in_document_order() {
    let (mut t, r) = tracker();
    t.add_section(SectionBounds::new("testimonials", 2800.0, 600.0).unwrap())
        .unwrap();
    let ids: Vec<_> = t.sections().map(|s| s.id.as_str().to_owned()).collect();
    assert_eq!(ids.last().map(String::as_str), Some("testimonials"));
    t.observe(Viewport::new(2800.0, 600.0));
    assert_eq!(r.get().as_str(), "testimonials");
    assert!(
        t.add_section(SectionBounds::new("home", 0.0, 10.0).unwrap())
            .is_err()
    );
}

#[test]
fn no_writes_after_teardown() {
    let (t, r) = tracker();
    t.apply(&entered("about"));
    let writes = r.writes();

    // Tear down the tracker state but keep the observer and its observations alive, so
    // crossings are still delivered to the section callbacks.
    let ActiveSectionTracker {
        observer,
        shared,
        sections,
        ..
    } = t;
    drop(shared);
    assert!(sections.iter().all(|(_, o)| o.is_active()));

    // "about" enters, then "about" leaves while "contact" enters.
    assert_eq!(observer.update(Viewport::new(900.0, 800.0)), 1);
    assert_eq!(observer.update(Viewport::new(2300.0, 800.0)), 2);
    assert_eq!(r.writes(), writes);
    assert_eq!(r.get().as_str(), "about");
}

#[test]
fn dropping_the_tracker_unsubscribes_every_section() {
    let (t, r) = tracker();
    let observer = t.observer.clone();
    assert_eq!(observer.observed(), 4);
    drop(t);
    assert_eq!(observer.observed(), 0);
    assert_eq!(observer.update(Viewport::new(2300.0, 800.0)), 0);
    assert_eq!(r.writes(), 0);
}

#[test]
fn entered_backlog_holds_each_section_once() {
    let (t, r) = tracker();
    for _ in 0..100 {
        t.apply(&entered("about"));
        t.apply(&entered("skills"));
    }
    assert_eq!(t.shared.borrow().entered.len(), 2);
    assert_eq!(r.writes(), 200);
    assert_eq!(
        t.take_entered(),
        vec![SectionId::from("about"), SectionId::from("skills")]
    );
    assert!(t.take_entered().is_empty());

    t.apply(&entered("skills"));
    assert_eq!(t.take_entered(), vec![SectionId::from("skills")]);
}

#[test]
fn relayout_reorders_sections() {
    let (mut t, _) = tracker();
    assert!(t.relayout_section(SectionBounds::new("home", 5000.0, 900.0).unwrap()));
    let first = t.sections().next().map(|s| s.id.clone());
    assert_eq!(first, Some(SectionId::from("about")));
}
