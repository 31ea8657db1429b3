/// Crate-wide result alias.
pub type GlassResult<T> = Result<T, GlassError>;

/// Errors surfaced by the fallible parts of the crate.
///
/// The component itself never returns these: attribute parsing degrades to defaults and probe
/// failures only clear the aspect reservation. They come from source resolution, decoding,
/// rasterization and configuration.
#[derive(thiserror::Error, Debug)]
pub enum GlassError {
    /// Invalid caller-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be resolved to bytes.
    #[error("source error: {0}")]
    Source(String),

    /// Image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassError {
    /// Build a [`GlassError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlassError::Source`].
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`GlassError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GlassError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlassError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
