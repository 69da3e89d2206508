//! Scene errors.

use thiserror::Error;

/// Errors raised by the scene model.
///
/// Validation failures are reported before any state is touched, so a
/// rejected call always leaves the previous state intact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl SceneError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SceneError::InvalidArgument(message.into())
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
