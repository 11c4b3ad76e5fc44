/// Convenience result type used across pixreveal.
pub type PixrevealResult<T> = Result<T, PixrevealError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Rendering and animation degrade to transparent output instead of
/// returning errors; this type covers configuration, assets and the
/// outer session surface.
#[derive(thiserror::Error, Debug)]
pub enum PixrevealError {
    /// Invalid user-provided configuration or session input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface or raster buffers that do not agree on their dimensions.
    #[error("render error: {0}")]
    Render(String),

    /// Image decoding or landscape library problems.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixrevealError {
    /// Build a [`PixrevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixrevealError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PixrevealError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PixrevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
