//! Easing curves and scalar/vector tweens.

/// Easing curves.
pub mod ease;
/// Timed interpolation between two values.
pub mod tween;
