use super::*;
use crate::motion::driver::{DriverCommand, RecordingDriver};

#[test]
fn handles_are_unique() {
    let mut reg = EntranceRegistry::new();
    let a = reg.create_element();
    let b = reg.create_element();
    assert_ne!(a, b);
}

#[test]
fn mount_entrances_play_once() {
    let mut reg = EntranceRegistry::new();
    let hero = reg.create_element();
    reg.register(hero, EntrancePreset::FadeUp, Trigger::Mount, Millis(200));
    let mut driver = RecordingDriver::new();

    assert_eq!(reg.run_mount(&mut driver), 1);
    assert_eq!(reg.run_mount(&mut driver), 0);

    let tweens = driver.tweens_for(hero);
    assert_eq!(tweens.len(), 2);
    assert!(tweens.iter().all(|t| t.delay == Millis(200)));
    assert!(
        tweens
            .iter()
            .any(|t| t.property == MotionProperty::TranslateY && t.to == 0.0)
    );
}

#[test]
fn section_entrances_wait_for_their_section() {
    let mut reg = EntranceRegistry::new();
    let cards: Vec<_> = (0..3).map(|_| reg.create_element()).collect();
    reg.register_staggered(
        &cards,
        EntrancePreset::ScaleIn,
        Trigger::SectionEnter(SectionId::from("projects")),
        Millis(0),
        Millis(150),
    );
    let mut driver = RecordingDriver::new();

    assert_eq!(reg.run_mount(&mut driver), 0);
    assert_eq!(reg.run_section(&SectionId::from("about"), &mut driver), 0);
    assert_eq!(reg.pending(), 3);

    assert_eq!(reg.run_section(&SectionId::from("projects"), &mut driver), 3);
    assert_eq!(reg.pending(), 0);
    let last = driver.tweens_for(cards[2]);
    assert_eq!(last[0].delay, Millis(300));
    assert!(
        driver
            .commands
            .iter()
            .all(|c| matches!(c, DriverCommand::Animate { .. }))
    );
}

#[test]
fn every_preset_fades_in() {
    for preset in [
        EntrancePreset::FadeUp,
        EntrancePreset::FadeIn,
        EntrancePreset::ScaleIn,
        EntrancePreset::SlideLeft,
        EntrancePreset::SlideRight,
    ] {
        let tweens = preset.tweens(Millis::ZERO);
        assert!(
            tweens
                .iter()
                .any(|t| t.property == MotionProperty::Opacity && t.from == 0.0 && t.to == 1.0)
        );
    }
}
