use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    rc::{Rc, Weak},
};

use crate::{
    animation::ease::Ease,
    foundation::core::{Millis, SectionId},
    foundation::error::{FolioError, FolioResult},
    motion::driver::MotionDriver,
    state::field::FieldWriter,
    tracker::geometry::{SectionBounds, Viewport},
    tracker::observer::{IntersectionEvent, IntersectionObserver, Observation},
};

/// Tuning for section tracking and scroll-to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackerOptions {
    /// Visible fraction at which a section counts as entered.
    pub threshold: f64,
    /// Height of the fixed header that scroll targets must clear.
    pub header_offset_px: f64,
    /// Smooth-scroll duration.
    pub scroll_duration: Millis,
    /// Smooth-scroll easing.
    pub scroll_ease: Ease,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            header_offset_px: 80.0,
            scroll_duration: Millis(800),
            scroll_ease: Ease::InOutCubic,
        }
    }
}

struct Shared {
    active: FieldWriter<SectionId>,
    threshold: f64,
    known: BTreeSet<SectionId>,
    entered: VecDeque<SectionId>,
}

impl Shared {
    fn activate(&mut self, id: &SectionId) {
        if self.active.get() != *id {
            tracing::debug!(section = %id, "active section changed");
            self.active.set(id.clone());
        }
    }

    fn apply(&mut self, event: &IntersectionEvent) {
        let IntersectionEvent::Entered { id, ratio } = event else {
            return;
        };
        if *ratio < self.threshold || !self.known.contains(id) {
            return;
        }
        // At most one pending entry per section.
        if !self.entered.contains(id) {
            self.entered.push_back(id.clone());
        }
        self.activate(id);
    }
}

/// Tracks which page section is active, for navigation highlighting.
///
/// Owns the single writer of the active-section field. The latest qualifying
/// [`IntersectionEvent::Entered`] wins; `Left` events never change the active section.
pub struct ActiveSectionTracker {
    observer: IntersectionObserver,
    shared: Rc<RefCell<Shared>>,
    // Document order (by top).
    sections: Vec<(SectionBounds, Observation)>,
    options: TrackerOptions,
}

impl ActiveSectionTracker {
    /// Observe `sections`, starting with `default_section` (or the first section) active.
    #[tracing::instrument(skip_all, fields(sections = sections.len()))]
    pub fn new(
        sections: Vec<SectionBounds>,
        default_section: Option<&SectionId>,
        active: FieldWriter<SectionId>,
        options: TrackerOptions,
    ) -> FolioResult<Self> {
        let Some(first) = sections.first() else {
            return Err(FolioError::config("section tracker needs at least one section"));
        };
        let initial = default_section.unwrap_or(&first.id).clone();
        if !sections.iter().any(|s| s.id == initial) {
            return Err(FolioError::config(format!(
                "default section '{initial}' is not on the page"
            )));
        }
        if !options.header_offset_px.is_finite() {
            return Err(FolioError::config("header offset must be finite"));
        }

        let observer = IntersectionObserver::new(options.threshold)?;
        let shared = Rc::new(RefCell::new(Shared {
            active,
            threshold: options.threshold,
            known: BTreeSet::new(),
            entered: VecDeque::new(),
        }));
        shared.borrow_mut().activate(&initial);

        let mut tracker = Self {
            observer,
            shared,
            sections: Vec::with_capacity(sections.len()),
            options,
        };
        for s in sections {
            tracker.add_section(s)?;
        }
        Ok(tracker)
    }

    /// Currently active section.
    pub fn active(&self) -> SectionId {
        self.shared.borrow().active.get()
    }

    /// Options in effect.
    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Observed sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionBounds> {
        self.sections.iter().map(|(b, _)| b)
    }

    /// Bounds of `id`, if it is on the page.
    pub fn section(&self, id: &SectionId) -> Option<&SectionBounds> {
        self.sections().find(|b| b.id == *id)
    }

    /// Feed a new viewport through the observer. Returns the number of crossings delivered.
    pub fn observe(&self, viewport: Viewport) -> usize {
        self.observer.update(viewport)
    }

    /// Apply one intersection event directly, as the observer callback would.
    pub fn apply(&self, event: &IntersectionEvent) {
        self.shared.borrow_mut().apply(event);
    }

    /// Smooth-scroll to `id` and make it active right away, without waiting for the observer.
    ///
    /// Unknown ids are ignored; returns whether a scroll was issued.
    pub fn scroll_to(&self, id: &SectionId, driver: &mut dyn MotionDriver) -> bool {
        let Some(bounds) = self.section(id) else {
            tracing::debug!(section = %id, "scroll target is not on the page");
            return false;
        };
        let y = (bounds.top - self.options.header_offset_px).max(0.0);
        driver.smooth_scroll_to(y, self.options.scroll_duration, self.options.scroll_ease);
        self.shared.borrow_mut().activate(id);
        true
    }

    /// Start observing another section.
    pub fn add_section(&mut self, bounds: SectionBounds) -> FolioResult<()> {
        if !self.shared.borrow_mut().known.insert(bounds.id.clone()) {
            return Err(FolioError::config(format!(
                "section '{}' is already on the page",
                bounds.id
            )));
        }
        let weak: Weak<RefCell<Shared>> = Rc::downgrade(&self.shared);
        let observation = self.observer.observe(bounds.clone(), move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().apply(event);
            }
        });
        let at = self
            .sections
            .partition_point(|(b, _)| b.top.total_cmp(&bounds.top).is_le());
        self.sections.insert(at, (bounds, observation));
        Ok(())
    }

    /// Stop observing `id`. If it was active, the first remaining section takes over.
    pub fn remove_section(&mut self, id: &SectionId) -> bool {
        let Some(pos) = self.sections.iter().position(|(b, _)| b.id == *id) else {
            return false;
        };
        // Dropping the observation unsubscribes its callback.
        drop(self.sections.remove(pos));

        let mut shared = self.shared.borrow_mut();
        shared.known.remove(id);
        shared.entered.retain(|e| e != id);
        if shared.active.get() == *id
            && let Some((first, _)) = self.sections.first()
        {
            shared.activate(&first.id);
        }
        true
    }

    /// Replace the geometry of an observed section after a relayout.
    pub fn relayout_section(&mut self, bounds: SectionBounds) -> bool {
        let Some(pos) = self.sections.iter().position(|(b, _)| b.id == bounds.id) else {
            return false;
        };
        let (_, observation) = self.sections.remove(pos);
        observation.relayout(bounds.clone());
        let at = self
            .sections
            .partition_point(|(b, _)| b.top.total_cmp(&bounds.top).is_le());
        self.sections.insert(at, (bounds, observation));
        true
    }

    /// Sections that crossed into view since the last call, each once, in order of their first
    /// crossing. The backlog never holds more entries than there are sections.
    pub fn take_entered(&self) -> Vec<SectionId> {
        self.shared.borrow_mut().entered.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/active.rs"]
mod tests;
