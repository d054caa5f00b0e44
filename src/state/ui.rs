use crate::{
    foundation::core::SectionId,
    state::field::{FieldWriter, StateField, field},
};

/// Color theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Follow the platform preference.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl ThemeMode {
    /// Resolve against the platform preference.
    pub fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::System => system_prefers_dark,
            Self::Light => false,
            Self::Dark => true,
        }
    }
}

/// Read handles for all UI state fields.
///
/// Each field has exactly one writer, handed out once through [`UiWriters`].
#[derive(Clone, Debug)]
pub struct UiState {
    /// Section highlighted in the navigation.
    pub active_section: StateField<SectionId>,
    /// Loading bar value in `[0, 100]`.
    pub load_progress: StateField<f64>,
    /// Set once when the loading screen gives way to the page.
    pub is_ready: StateField<bool>,
    /// Mobile navigation drawer.
    pub menu_open: StateField<bool>,
    /// Theme preference.
    pub theme: StateField<ThemeMode>,
}

/// The single writer of each UI field, to be moved into its owning component.
#[derive(Debug)]
pub struct UiWriters {
    /// Owned by the active-section tracker.
    pub active_section: FieldWriter<SectionId>,
    /// Owned by the load-progress interpolator.
    pub load_progress: FieldWriter<f64>,
    /// Owned by the load-progress interpolator.
    pub is_ready: FieldWriter<bool>,
    /// Owned by [`MenuToggle`].
    pub menu_open: FieldWriter<bool>,
    /// Owned by [`ThemeSwitch`].
    pub theme: FieldWriter<ThemeMode>,
}

impl UiState {
    /// Fresh state: `initial_section` active, progress 0, not ready, menu closed.
    pub fn new(initial_section: SectionId, theme: ThemeMode) -> (Self, UiWriters) {
        let (active_w, active_r) = field("activeSection", initial_section);
        let (progress_w, progress_r) = field("loadProgress", 0.0);
        let (ready_w, ready_r) = field("isReady", false);
        let (menu_w, menu_r) = field("isMenuOpen", false);
        let (theme_w, theme_r) = field("theme", theme);
        (
            Self {
                active_section: active_r,
                load_progress: progress_r,
                is_ready: ready_r,
                menu_open: menu_r,
                theme: theme_r,
            },
            UiWriters {
                active_section: active_w,
                load_progress: progress_w,
                is_ready: ready_w,
                menu_open: menu_w,
                theme: theme_w,
            },
        )
    }
}

/// Owner of the mobile menu flag.
#[derive(Debug)]
pub struct MenuToggle {
    open: FieldWriter<bool>,
}

impl MenuToggle {
    /// Take ownership of the menu writer.
    pub fn new(open: FieldWriter<bool>) -> Self {
        Self { open }
    }

    /// Flip the menu; returns the new state.
    pub fn toggle(&self) -> bool {
        let next = !self.open.get();
        self.open.set(next);
        next
    }

    /// Close the menu if it is open.
    pub fn close(&self) {
        if self.open.get() {
            self.open.set(false);
        }
    }
}

/// Owner of the theme preference.
#[derive(Debug)]
pub struct ThemeSwitch {
    mode: FieldWriter<ThemeMode>,
    system_prefers_dark: bool,
}

impl ThemeSwitch {
    /// Take ownership of the theme writer.
    pub fn new(mode: FieldWriter<ThemeMode>, system_prefers_dark: bool) -> Self {
        Self {
            mode,
            system_prefers_dark,
        }
    }

    /// Whether the page currently renders dark.
    pub fn is_dark(&self) -> bool {
        self.mode.get().is_dark(self.system_prefers_dark)
    }

    /// Switch to the explicit opposite of what is shown now; returns the new dark flag.
    pub fn toggle(&self) -> bool {
        let dark = !self.is_dark();
        self.mode
            .set(if dark { ThemeMode::Dark } else { ThemeMode::Light });
        dark
    }

    /// Set an explicit preference.
    pub fn set(&self, mode: ThemeMode) {
        self.mode.set(mode);
    }

    /// Record a platform preference change; only matters while in [`ThemeMode::System`].
    pub fn set_system_preference(&mut self, prefers_dark: bool) {
        self.system_prefers_dark = prefers_dark;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/ui.rs"]
mod tests;
