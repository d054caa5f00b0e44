use super::*;

#[test]
fn fresh_state_defaults() {
    let (ui, _w) = UiState::new(SectionId::from("home"), ThemeMode::System);
    assert_eq!(ui.active_section.get().as_str(), "home");
    assert_eq!(ui.load_progress.get(), 0.0);
    assert!(!ui.is_ready.get());
    assert!(!ui.menu_open.get());
    assert_eq!(ui.theme.get(), ThemeMode::System);
}

#[test]
fn menu_toggle_and_close() {
    let (ui, w) = UiState::new(SectionId::from("home"), ThemeMode::Light);
    let menu = MenuToggle::new(w.menu_open);
    assert!(menu.toggle());
    assert!(ui.menu_open.get());
    menu.close();
    assert!(!ui.menu_open.get());
    let writes = ui.menu_open.writes();
    menu.close();
    assert_eq!(ui.menu_open.writes(), writes);
}

#[test]
fn theme_system_follows_platform_until_toggled() {
    let (ui, w) = UiState::new(SectionId::from("home"), ThemeMode::System);
    let mut theme = ThemeSwitch::new(w.theme, true);
    assert!(theme.is_dark());
    theme.set_system_preference(false);
    assert!(!theme.is_dark());

    assert!(theme.toggle());
    assert_eq!(ui.theme.get(), ThemeMode::Dark);
    theme.set_system_preference(false);
    assert!(theme.is_dark());
    assert!(!theme.toggle());
    assert_eq!(ui.theme.get(), ThemeMode::Light);
}

#[test]
fn theme_mode_serde_names() {
    let m: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
    assert_eq!(m, ThemeMode::Dark);
    assert!(!ThemeMode::Light.is_dark(true));
}
