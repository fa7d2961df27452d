use closet_sdk::errors::ClosetError;
use url::Url;

use super::notice::NoticeKind;

/// Generic text shown when saving fails for a reason the user cannot fix.
pub const SAVE_FAILED_MESSAGE: &str =
    "Something went wrong while saving your item. Please try again.";

pub const DUPLICATE_PAIR_MESSAGE: &str = "This outfit pair is already saved.";

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Image storage failed: {0}")]
    Storage(#[source] anyhow::Error),

    #[error("Record persistence failed: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("Outfit pair already exists: {top_url} + {bottom_url}")]
    DuplicatePair { top_url: Url, bottom_url: Url },

    #[error("Submission timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("A submission is already in progress")]
    Busy,

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the last step")]
    AtLastStep,

    #[error("Items can only be submitted from the review step")]
    NotAtReview,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error("Submission failed: {0}")]
    Submission(#[source] ClosetError),

    #[error("Email is already in use.")]
    EmailInUse,

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Not signed in")]
    Unauthenticated,
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Text for the transient notice shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Auth { message } => message.clone(),
            Self::Submission(ClosetError::Validation { message }) => message.clone(),
            Self::DuplicatePair { .. } | Self::Submission(ClosetError::DuplicatePair) => {
                DUPLICATE_PAIR_MESSAGE.to_owned()
            }
            Self::Storage(_)
            | Self::Persistence(_)
            | Self::Timeout { .. }
            | Self::Submission(_) => SAVE_FAILED_MESSAGE.to_owned(),
            Self::Busy => "Please wait for the current submission to finish.".to_owned(),
            Self::Unauthenticated => "Please log in to continue.".to_owned(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            Self::Validation { .. }
            | Self::AtFirstStep
            | Self::AtLastStep
            | Self::NotAtReview
            | Self::Submission(ClosetError::Validation { .. }) => NoticeKind::Validation,
            Self::DuplicatePair { .. } | Self::Submission(ClosetError::DuplicatePair) => {
                NoticeKind::Duplicate
            }
            _ => NoticeKind::Failure,
        }
    }
}

impl From<DomainError> for ClosetError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { message, .. } => Self::validation(message),
            DomainError::Storage(err) | DomainError::Persistence(err) => {
                Self::unavailable(err.to_string())
            }
            DomainError::DuplicatePair { .. } => Self::DuplicatePair,
            DomainError::Timeout { .. } => Self::Timeout,
            DomainError::Submission(err) => err,
            DomainError::NotSubmitting => Self::Internal,
            other @ (DomainError::Busy
            | DomainError::AtFirstStep
            | DomainError::AtLastStep
            | DomainError::NotAtReview
            | DomainError::EmailInUse
            | DomainError::Auth { .. }
            | DomainError::Unauthenticated) => Self::validation(other.user_message()),
        }
    }
}
