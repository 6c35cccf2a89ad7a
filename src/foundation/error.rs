/// Result alias used throughout the crate.
pub type SwoopResult<T> = Result<T, SwoopError>;

/// Errors surfaced while loading or preparing a presentation.
///
/// Playback itself never fails: invalid runtime parameters are substituted with defaults.
#[derive(thiserror::Error, Debug)]
pub enum SwoopError {
    /// The presentation model violates a structural or numeric invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// An SVG document or element reference could not be resolved.
    #[error("svg error: {0}")]
    Svg(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwoopError {
    /// Build a [`SwoopError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SwoopError::Svg`].
    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    /// Build a [`SwoopError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SwoopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
