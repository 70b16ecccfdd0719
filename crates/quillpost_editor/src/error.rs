//! Error types for the editor crate.

use quillpost_core::AppError;
use thiserror::Error;

/// Failure reported by a [`crate::BlogBackend`].
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Storage error: {0}")]
    Storage(#[from] AppError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::TaskJoin(value.to_string())
    }
}

/// Input rejected before any backend call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add a title to your post")]
    TitleRequired,

    #[error("Please add some content to your post")]
    ContentRequired,
}

/// Why a publish did not complete.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A publish is already in progress")]
    AlreadyPublishing,

    #[error("Publish was declined")]
    Declined,

    #[error("Publish failed: {0}")]
    Backend(#[from] BackendError),
}
