//! Which section the navigation highlights.

/// Scroll-driven active section.
pub mod active;
/// Section and viewport rectangles.
pub mod geometry;
/// Threshold-crossing notifications.
pub mod observer;
