/// Convenience result type used across thumbkit.
pub type ThumbkitResult<T> = Result<T, ThumbkitError>;

/// Top-level error taxonomy.
///
/// Only [`ThumbkitError::Allocation`] ever escapes a render call. The other kinds are raised
/// internally and absorbed into diagnostics or skipped-element outcomes, or surface from the
/// boundary helpers (decoding, export).
#[derive(thiserror::Error, Debug)]
pub enum ThumbkitError {
    /// The output canvas could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// No usable font face, or a face that failed to load or shape.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization of a single element failed.
    #[error("raster error: {0}")]
    Raster(String),

    /// Input bytes (layout JSON, subject image) could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Output encoding (PNG/JPEG) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbkitError {
    /// Build a [`ThumbkitError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`ThumbkitError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ThumbkitError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`ThumbkitError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ThumbkitError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
