/// Convenience result type used across stickerbooth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by editor APIs.
///
/// `Asset` and `Device` are fatal for a session. Everything the editor can recover from locally
/// (cancelled dialogs, out-of-bounds sticker placement) never surfaces as an error.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid buffers, configuration, or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required sticker bitmap could not be loaded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The capture device could not be opened.
    #[error("device error: {0}")]
    Device(String),

    /// Video encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BoothError::Device`] value.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for errors that must terminate the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Asset(_) | Self::Device(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
