use crate::{
    animation::ease::Ease,
    animation::tween::stagger,
    foundation::core::{Millis, SectionId},
    motion::driver::{ElementHandle, MotionDriver, MotionProperty, TweenSpec},
};

const ENTRANCE_DURATION: Millis = Millis(700);
const SLIDE_DISTANCE_PX: f64 = 60.0;
const RISE_DISTANCE_PX: f64 = 40.0;

/// Canned entrance animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrancePreset {
    /// Fade in while rising into place.
    FadeUp,
    /// Plain fade.
    FadeIn,
    /// Fade in while growing from 80%.
    ScaleIn,
    /// Slide in from the left.
    SlideLeft,
    /// Slide in from the right.
    SlideRight,
}

impl EntrancePreset {
    /// Property tweens for this preset, all starting after `delay`.
    pub fn tweens(self, delay: Millis) -> Vec<TweenSpec> {
        let spec = |property, from, to, ease| TweenSpec {
            property,
            from,
            to,
            duration: ENTRANCE_DURATION,
            delay,
            ease,
        };
        let fade = spec(MotionProperty::Opacity, 0.0, 1.0, Ease::OutQuad);
        match self {
            Self::FadeIn => vec![fade],
            Self::FadeUp => vec![
                fade,
                spec(MotionProperty::TranslateY, RISE_DISTANCE_PX, 0.0, Ease::OutCubic),
            ],
            Self::ScaleIn => vec![fade, spec(MotionProperty::Scale, 0.8, 1.0, Ease::OutBack)],
            Self::SlideLeft => vec![
                fade,
                spec(MotionProperty::TranslateX, -SLIDE_DISTANCE_PX, 0.0, Ease::OutCubic),
            ],
            Self::SlideRight => vec![
                fade,
                spec(MotionProperty::TranslateX, SLIDE_DISTANCE_PX, 0.0, Ease::OutCubic),
            ],
        }
    }
}

/// When an entrance plays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// As soon as the page is ready.
    Mount,
    /// The first time the section becomes active-eligible (crosses the threshold).
    SectionEnter(SectionId),
}

#[derive(Debug)]
struct Entry {
    element: ElementHandle,
    preset: EntrancePreset,
    trigger: Trigger,
    delay: Millis,
    fired: bool,
}

/// Entrance animations keyed by element handle. Each one plays at most once.
#[derive(Debug, Default)]
pub struct EntranceRegistry {
    next_element: u64,
    entries: Vec<Entry>,
}

impl EntranceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for a newly created element.
    pub fn create_element(&mut self) -> ElementHandle {
        let h = ElementHandle(self.next_element);
        self.next_element += 1;
        h
    }

    /// Attach an entrance to `element`.
    pub fn register(
        &mut self,
        element: ElementHandle,
        preset: EntrancePreset,
        trigger: Trigger,
        delay: Millis,
    ) {
        self.entries.push(Entry {
            element,
            preset,
            trigger,
            delay,
            fired: false,
        });
    }

    /// Attach the same entrance to a group, delays spaced `step` apart.
    pub fn register_staggered(
        &mut self,
        elements: &[ElementHandle],
        preset: EntrancePreset,
        trigger: Trigger,
        base: Millis,
        step: Millis,
    ) {
        for (element, delay) in elements.iter().zip(stagger(elements.len(), base, step)) {
            self.register(*element, preset, trigger.clone(), delay);
        }
    }

    /// Play every not-yet-played mount entrance.
    pub fn run_mount(&mut self, driver: &mut dyn MotionDriver) -> usize {
        self.run_matching(driver, |t| matches!(t, Trigger::Mount))
    }

    /// Play every not-yet-played entrance bound to `section`.
    pub fn run_section(&mut self, section: &SectionId, driver: &mut dyn MotionDriver) -> usize {
        self.run_matching(
            driver,
            |t| matches!(t, Trigger::SectionEnter(id) if id == section),
        )
    }

    fn run_matching(
        &mut self,
        driver: &mut dyn MotionDriver,
        wants: impl Fn(&Trigger) -> bool,
    ) -> usize {
        let mut played = 0;
        for entry in self.entries.iter_mut().filter(|e| !e.fired && wants(&e.trigger)) {
            for spec in entry.preset.tweens(entry.delay) {
                driver.animate(entry.element, &spec);
            }
            entry.fired = true;
            played += 1;
        }
        if played > 0 {
            tracing::debug!(played, "entrance animations started");
        }
        played
    }

    /// Entrances that have not played yet.
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.fired).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/entrance.rs"]
mod tests;
