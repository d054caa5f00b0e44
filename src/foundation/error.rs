/// Convenience result type used across folio.
pub type FolioResult<T> = Result<T, FolioError>;

/// Top-level error taxonomy used by the motion core.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Invalid page or motion configuration (zero-count rings, bad thresholds, unknown ids).
    #[error("config error: {0}")]
    Config(String),

    /// Invalid tween or ramp parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FolioError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FolioError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
