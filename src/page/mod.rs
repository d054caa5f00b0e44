//! Page configuration, content, and the mounted session.

/// JSON page configuration.
pub mod config;
/// Static content records.
pub mod content;
/// Mounted page wiring every component together.
pub mod session;
