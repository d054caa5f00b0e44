//! Single-writer UI fields.

/// Reader/writer cell pair.
pub mod field;
/// The page's UI fields and the small components that own them.
pub mod ui;
