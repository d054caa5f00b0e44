//! The boundary to whatever actually animates the page.
//!
//! Components never tween DOM-like properties themselves; they describe the tween and hand it
//! to a [`driver::MotionDriver`].

/// Driver trait and a recording implementation.
pub mod driver;
/// One-shot entrance animations.
pub mod entrance;
