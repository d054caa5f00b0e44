//! Virtual-clock scheduling.

/// Timers and frame callbacks.
pub mod event_loop;
