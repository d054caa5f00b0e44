//! Positions of items on the skills orbit.

/// Ring geometry and per-frame placement.
pub mod orbit;
