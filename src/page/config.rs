use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::core::{Millis, SectionId},
    foundation::error::{FolioError, FolioResult},
    layout::orbit::{OrbitRing, OrbitSystem},
    page::content::{Experience, PageMetadata, Project, Service, Skill, Testimonial},
    progress::interpolator::LoadProgressConfig,
    state::ui::ThemeMode,
    tracker::active::TrackerOptions,
    tracker::geometry::{SectionBounds, stack_sections},
};

const BUILTIN_PORTFOLIO: &str = include_str!("../../data/portfolio.json");

/// One navigable page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    /// Anchor id.
    pub id: SectionId,
    /// Navigation label.
    pub label: String,
    /// Height used to lay the page out when no rendered geometry is available.
    #[serde(default = "default_section_height")]
    pub height_hint_px: f64,
}

fn default_section_height() -> f64 {
    900.0
}

/// Motion tuning shared by every theme variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Loading screen.
    pub load: LoadProgressConfig,
    /// Visible fraction for section activation.
    pub section_threshold: f64,
    /// Fixed header height cleared by scroll-to.
    pub header_offset_px: f64,
    /// Smooth-scroll duration.
    pub scroll_duration_ms: u64,
    /// Smooth-scroll curve.
    pub scroll_ease: Ease,
    /// Skills orbit rings, innermost first.
    pub rings: Vec<OrbitRing>,
    /// Orbit frame cadence.
    pub frame_interval_ms: u64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        let tracker = TrackerOptions::default();
        Self {
            load: LoadProgressConfig::default(),
            section_threshold: tracker.threshold,
            header_offset_px: tracker.header_offset_px,
            scroll_duration_ms: tracker.scroll_duration.0,
            scroll_ease: tracker.scroll_ease,
            rings: vec![
                OrbitRing::new(120.0).spinning(12.0),
                OrbitRing::new(200.0).spinning(-8.0).with_phase(22.5),
            ],
            frame_interval_ms: 16,
        }
    }
}

impl MotionSettings {
    /// Tracker options derived from these settings.
    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            threshold: self.section_threshold,
            header_offset_px: self.header_offset_px,
            scroll_duration: Millis(self.scroll_duration_ms),
            scroll_ease: self.scroll_ease,
        }
    }
}

/// Everything the page is configured with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Document metadata.
    #[serde(default)]
    pub metadata: PageMetadata,
    /// Sections in document order.
    pub sections: Vec<SectionSpec>,
    /// Section active before any scrolling; defaults to the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_section: Option<SectionId>,
    /// Skills on the orbit.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Project gallery.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Work history.
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Client quotes.
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    /// Offered services.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Motion tuning.
    #[serde(default)]
    pub motion: MotionSettings,
    /// Theme preference.
    #[serde(default)]
    pub theme: ThemeMode,
}

impl PageConfig {
    /// Parse a config from a JSON reader (not validated).
    pub fn from_reader<R: std::io::Read>(r: R) -> FolioResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FolioError::serde(format!("parse page config JSON: {e}")))
    }

    /// Parse a config from a JSON string (not validated).
    pub fn from_json(s: &str) -> FolioResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FolioError::serde(format!("parse page config JSON: {e}")))
    }

    /// Parse and validate a config file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FolioError::Other(anyhow::Error::new(e).context(format!(
                "open page config '{}'",
                path.display()
            )))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The portfolio shipped with the crate.
    pub fn builtin() -> FolioResult<Self> {
        let cfg = Self::from_json(BUILTIN_PORTFOLIO)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> FolioResult<()> {
        if self.sections.is_empty() {
            return Err(FolioError::config("page needs at least one section"));
        }
        let mut seen = BTreeSet::new();
        for s in &self.sections {
            if s.id.as_str().is_empty() {
                return Err(FolioError::config("section ids must be non-empty"));
            }
            if !seen.insert(&s.id) {
                return Err(FolioError::config(format!("duplicate section id '{}'", s.id)));
            }
            if !s.height_hint_px.is_finite() || s.height_hint_px < 0.0 {
                return Err(FolioError::config(format!(
                    "section '{}' has an invalid height hint",
                    s.id
                )));
            }
        }
        if let Some(d) = &self.default_section
            && !seen.contains(d)
        {
            return Err(FolioError::config(format!(
                "default section '{d}' is not declared"
            )));
        }

        let m = &self.motion;
        if !(m.section_threshold > 0.0 && m.section_threshold <= 1.0) {
            return Err(FolioError::config(format!(
                "section threshold must be in (0, 1], got {}",
                m.section_threshold
            )));
        }
        if !m.header_offset_px.is_finite() {
            return Err(FolioError::config("header offset must be finite"));
        }
        if m.frame_interval_ms == 0 {
            return Err(FolioError::config("frame interval must be > 0"));
        }
        m.load.validate()?;
        self.orbit_system()?;

        for t in &self.testimonials {
            if !(1..=5).contains(&t.rating) {
                return Err(FolioError::config(format!(
                    "testimonial by '{}' has rating {} outside 1..=5",
                    t.author, t.rating
                )));
            }
        }
        Ok(())
    }

    /// Section that starts active.
    pub fn initial_section(&self) -> FolioResult<SectionId> {
        self.default_section
            .clone()
            .or_else(|| self.sections.first().map(|s| s.id.clone()))
            .ok_or_else(|| FolioError::config("page needs at least one section"))
    }

    /// Sections stacked by their height hints.
    pub fn stacked_layout(&self) -> FolioResult<Vec<SectionBounds>> {
        stack_sections(
            self.sections
                .iter()
                .map(|s| (s.id.clone(), s.height_hint_px)),
        )
    }

    /// Skills orbit built from the ring table.
    pub fn orbit_system(&self) -> FolioResult<OrbitSystem> {
        OrbitSystem::new(&self.motion.rings, &self.skills)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
