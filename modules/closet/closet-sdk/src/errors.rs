//! Error types for the closet SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClosetError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An identical (top, bottom) pair is already saved.
    #[error("Outfit pair already exists")]
    DuplicatePair,

    /// The image or record backend could not complete the request.
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error")]
    Internal,
}

impl ClosetError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout)
    }
}
