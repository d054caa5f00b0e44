//! Folio is the motion core of a single-page portfolio.
//!
//! It owns the pieces of the page that move on their own:
//!
//! - the skills orbit ([`OrbitSystem`], [`orbit_offset`]),
//! - the navigation highlight that follows scrolling ([`ActiveSectionTracker`]),
//! - the loading screen's fake progress ramp ([`LoadProgress`]).
//!
//! Everything runs on a single-threaded [`EventLoop`] with a virtual clock. A [`PageSession`]
//! mounts all components from a [`PageConfig`]; dropping it tears them down.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Easing curves and tweens.
pub mod animation;
/// Orbit layout.
pub mod layout;
/// Motion driver boundary and entrance animations.
pub mod motion;
/// Page config and session.
pub mod page;
/// Load progress.
pub mod progress;
/// Event loop.
pub mod runtime;
/// UI state fields.
pub mod state;
/// Section tracking.
pub mod tracker;

pub use crate::foundation::core::{Millis, Point, Rect, SectionId, Vec2};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Lerp, Tween, stagger};
pub use crate::layout::orbit::{
    OrbitPlacement, OrbitRing, OrbitSystem, Orbiting, PlacedItem, base_angle_deg, orbit_offset,
};
pub use crate::motion::driver::{
    DriverCommand, ElementHandle, MotionDriver, MotionProperty, RecordingDriver, TweenSpec,
};
pub use crate::motion::entrance::{EntrancePreset, EntranceRegistry, Trigger};
pub use crate::page::config::{MotionSettings, PageConfig, SectionSpec};
pub use crate::page::content::{
    Experience, PageMetadata, Project, Service, Skill, Testimonial,
};
pub use crate::page::session::{PageElements, PageSession, PageSnapshot};
pub use crate::progress::interpolator::{
    LoadPhase, LoadProgress, LoadProgressConfig, PROGRESS_MAX, ProgressRamp, ProgressWriters,
    bar_width_percent, stroke_dash_offset,
};
pub use crate::runtime::event_loop::{EventLoop, FRAME_INTERVAL, TimerHandle};
pub use crate::state::field::{FieldWriter, StateField, field};
pub use crate::state::ui::{MenuToggle, ThemeMode, ThemeSwitch, UiState, UiWriters};
pub use crate::tracker::active::{ActiveSectionTracker, TrackerOptions};
pub use crate::tracker::geometry::{SectionBounds, Viewport, document_height, stack_sections};
pub use crate::tracker::observer::{IntersectionEvent, IntersectionObserver, Observation};
