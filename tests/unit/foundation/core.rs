use super::*;

#[test]
fn millis_since_saturates() {
    assert_eq!(Millis(500).since(Millis(200)), Millis(300));
    assert_eq!(Millis(100).since(Millis(200)), Millis::ZERO);
    assert_eq!(Millis(u64::MAX).after(Millis(1)), Millis(u64::MAX));
}

#[test]
fn millis_seconds_conversion() {
    assert_eq!(Millis(2500).as_secs_f64(), 2.5);
    assert_eq!(Millis(7).to_string(), "7ms");
}

#[test]
fn section_id_serializes_as_plain_string() {
    let id = SectionId::from("about");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"about\"");
    let back: SectionId = serde_json::from_str("\"projects\"").unwrap();
    assert_eq!(back.as_str(), "projects");
}
