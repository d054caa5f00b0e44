use std::{cell::RefCell, rc::Rc};

use crate::{
    foundation::core::{Millis, SectionId},
    foundation::error::FolioResult,
    layout::orbit::{OrbitSystem, PlacedItem},
    motion::driver::{ElementHandle, MotionDriver},
    motion::entrance::{EntrancePreset, EntranceRegistry, Trigger},
    page::config::PageConfig,
    progress::interpolator::{LoadPhase, LoadProgress, ProgressWriters},
    runtime::event_loop::{EventLoop, TimerHandle},
    state::ui::{MenuToggle, ThemeSwitch, UiState},
    tracker::active::ActiveSectionTracker,
    tracker::geometry::{SectionBounds, Viewport},
};

const CARD_STAGGER: Millis = Millis(120);

/// Serializable view of the page state at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    /// Loop time.
    pub at: Millis,
    /// Highlighted navigation entry.
    pub active_section: SectionId,
    /// Loading bar value.
    pub load_progress: f64,
    /// Loader phase, `None` once the loader is gone.
    pub load_phase: Option<LoadPhase>,
    /// Whether the page has been revealed.
    pub ready: bool,
    /// Mobile menu.
    pub menu_open: bool,
    /// Resolved theme.
    pub dark: bool,
    /// Orbit frames rendered since mount.
    pub orbit_frames: u64,
}

#[derive(Default)]
struct OrbitFrame {
    count: u64,
    items: Vec<PlacedItem>,
}

/// Handles for the elements whose entrances the page registers.
#[derive(Clone, Debug, Default)]
pub struct PageElements {
    /// One heading per section, in section order.
    pub headings: Vec<(SectionId, ElementHandle)>,
    /// One badge per skill, in config order.
    pub skill_badges: Vec<ElementHandle>,
    /// One card per project.
    pub project_cards: Vec<ElementHandle>,
}

/// The mounted page: every motion component wired to one [`EventLoop`].
///
/// Dropping the session (or calling [`unmount`](Self::unmount)) releases all timers and
/// observations; the UI fields then keep their last values and are never written again.
pub struct PageSession {
    event_loop: EventLoop,
    mounted_at: Millis,
    ui: UiState,
    tracker: ActiveSectionTracker,
    loader: Option<LoadProgress>,
    orbit: Rc<OrbitSystem>,
    frame: Rc<RefCell<OrbitFrame>>,
    frame_ticker: Option<TimerHandle>,
    menu: MenuToggle,
    theme: ThemeSwitch,
    entrances: EntranceRegistry,
    elements: PageElements,
    revealed: bool,
}

impl PageSession {
    /// Mount the page described by `config`.
    ///
    /// `layout` is the rendered section geometry; when `None` the sections are stacked from
    /// their height hints.
    #[tracing::instrument(skip_all, fields(sections = config.sections.len()))]
    pub fn mount(
        config: &PageConfig,
        event_loop: &EventLoop,
        layout: Option<Vec<SectionBounds>>,
        system_prefers_dark: bool,
    ) -> FolioResult<Self> {
        config.validate()?;
        let layout = match layout {
            Some(l) => l,
            None => config.stacked_layout()?,
        };
        let orbit = Rc::new(config.orbit_system()?);

        let (ui, writers) = UiState::new(config.initial_section()?, config.theme);
        let tracker = ActiveSectionTracker::new(
            layout,
            config.default_section.as_ref(),
            writers.active_section,
            config.motion.tracker_options(),
        )?;
        let loader = LoadProgress::start(
            event_loop,
            config.motion.load,
            ProgressWriters {
                progress: writers.load_progress,
                ready: writers.is_ready,
            },
        )?;

        let mounted_at = event_loop.now();
        let frame = Rc::new(RefCell::new(OrbitFrame::default()));
        let frame_ticker = {
            let orbit = Rc::downgrade(&orbit);
            let frame = Rc::downgrade(&frame);
            event_loop.set_interval(Millis(config.motion.frame_interval_ms), move |now| {
                let (Some(orbit), Some(frame)) = (orbit.upgrade(), frame.upgrade()) else {
                    return;
                };
                match orbit.frame(now.since(mounted_at)) {
                    Ok(items) => {
                        let mut f = frame.borrow_mut();
                        f.items = items;
                        f.count += 1;
                    }
                    Err(e) => tracing::warn!(error = %e, "orbit frame skipped"),
                }
            })
        };

        let mut entrances = EntranceRegistry::new();
        let elements = register_entrances(config, &mut entrances);

        tracing::debug!(at = %mounted_at, "page mounted");
        Ok(Self {
            event_loop: event_loop.clone(),
            mounted_at,
            ui,
            tracker,
            loader: Some(loader),
            orbit,
            frame,
            frame_ticker: Some(frame_ticker),
            menu: MenuToggle::new(writers.menu_open),
            theme: ThemeSwitch::new(writers.theme, system_prefers_dark),
            entrances,
            elements,
            revealed: false,
        })
    }

    /// Read handles for the UI fields.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Element handles registered at mount.
    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    /// Section tracker.
    pub fn tracker(&self) -> &ActiveSectionTracker {
        &self.tracker
    }

    /// Advance the loop by `delta`, then start any entrances that became due.
    pub fn advance(&mut self, delta: Millis, driver: &mut dyn MotionDriver) -> usize {
        let fired = self.event_loop.advance_by(delta);
        self.settle(driver);
        fired
    }

    /// The viewport moved.
    pub fn scroll(&mut self, viewport: Viewport, driver: &mut dyn MotionDriver) -> usize {
        let crossings = self.tracker.observe(viewport);
        self.settle(driver);
        crossings
    }

    /// Navigation click: close the menu and scroll to `id`. Unknown ids do nothing.
    pub fn scroll_to(&mut self, id: &SectionId, driver: &mut dyn MotionDriver) -> bool {
        let moved = self.tracker.scroll_to(id, driver);
        if moved {
            self.menu.close();
        }
        moved
    }

    /// Hamburger button.
    pub fn toggle_menu(&self) -> bool {
        self.menu.toggle()
    }

    /// Theme button; returns whether the page is now dark.
    pub fn toggle_theme(&self) -> bool {
        self.theme.toggle()
    }

    /// Whether the page renders dark right now.
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Platform color-scheme change.
    pub fn set_system_dark(&mut self, prefers_dark: bool) {
        self.theme.set_system_preference(prefers_dark);
    }

    /// Latest orbit frame produced by the frame ticker.
    pub fn orbit_frame(&self) -> Vec<PlacedItem> {
        self.frame.borrow().items.clone()
    }

    /// Orbit placements at the loop's current time, computed on demand.
    pub fn orbit_now(&self) -> FolioResult<Vec<PlacedItem>> {
        self.orbit.frame(self.event_loop.now().since(self.mounted_at))
    }

    /// Current state.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            at: self.event_loop.now(),
            active_section: self.ui.active_section.get(),
            load_progress: self.ui.load_progress.get(),
            load_phase: self.loader.as_ref().map(LoadProgress::phase),
            ready: self.ui.is_ready.get(),
            menu_open: self.ui.menu_open.get(),
            dark: self.theme.is_dark(),
            orbit_frames: self.frame.borrow().count,
        }
    }

    /// Entrances not yet played.
    pub fn pending_entrances(&self) -> usize {
        self.entrances.pending()
    }

    /// Tear the page down, releasing every timer and observation.
    pub fn unmount(self) {
        tracing::debug!(at = %self.event_loop.now(), "page unmounted");
    }

    fn settle(&mut self, driver: &mut dyn MotionDriver) {
        if !self.revealed && self.ui.is_ready.get() {
            self.revealed = true;
            // The loading screen is gone for good.
            self.loader = None;
            self.entrances.run_mount(driver);
        }
        for id in self.tracker.take_entered() {
            self.entrances.run_section(&id, driver);
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.frame_ticker.take();
        self.loader.take();
    }
}

fn register_entrances(config: &PageConfig, reg: &mut EntranceRegistry) -> PageElements {
    let mut elements = PageElements::default();
    for (idx, section) in config.sections.iter().enumerate() {
        let heading = reg.create_element();
        let trigger = if idx == 0 {
            Trigger::Mount
        } else {
            Trigger::SectionEnter(section.id.clone())
        };
        reg.register(heading, EntrancePreset::FadeUp, trigger, Millis::ZERO);
        elements.headings.push((section.id.clone(), heading));
    }

    let skills_trigger = section_trigger(config, "skills");
    elements.skill_badges = (0..config.skills.len())
        .map(|_| reg.create_element())
        .collect();
    reg.register_staggered(
        &elements.skill_badges,
        EntrancePreset::ScaleIn,
        skills_trigger,
        Millis(200),
        CARD_STAGGER,
    );

    let projects_trigger = section_trigger(config, "projects");
    elements.project_cards = (0..config.projects.len())
        .map(|_| reg.create_element())
        .collect();
    reg.register_staggered(
        &elements.project_cards,
        EntrancePreset::FadeUp,
        projects_trigger,
        Millis(100),
        CARD_STAGGER,
    );
    elements
}

// Content blocks animate with their section when it exists, otherwise on reveal.
fn section_trigger(config: &PageConfig, id: &str) -> Trigger {
    config
        .sections
        .iter()
        .find(|s| s.id.as_str() == id)
        .map_or(Trigger::Mount, |s| Trigger::SectionEnter(s.id.clone()))
}

#[cfg(test)]
#[path = "../../tests/unit/page/session.rs"]
mod tests;
