//! Backend adapter error types

use thiserror::Error;

/// Coarse classification of a [`BackendError`]
///
/// Callers that only need to decide how to surface an error (bad input,
/// absent record, conflicting write, unreachable backend) match on this
/// instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected before any network call
    InvalidArgument,
    /// The backend answered 404
    NotFound,
    /// A write would duplicate an existing record
    Conflict,
    /// The backend was unreachable or answered with an unexpected status or body
    Transport,
}

/// Backend adapter errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// Invalid input provided to a gateway operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend has no record at this path
    #[error("404: Not Found ({path})")]
    NotFound { path: String },

    /// A uniquely-constrained field already exists in the backend
    #[error("{field} is already in use")]
    DuplicateField {
        /// Name of the colliding field (last segment of the rule's path)
        field: String,
        /// Dotted path inside the input that triggered the collision
        path: String,
        /// Backend resource the existence check ran against
        resource: String,
    },

    /// A reviewer tried to review the same book twice
    #[error("Users can only submit one review per book")]
    DuplicateReview { book_id: String, reviewer_id: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx, non-404 status
    #[error("Backend responded {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// JSON parsing failed
    #[error("Failed to parse backend response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BackendError::NotFound { .. } => ErrorKind::NotFound,
            BackendError::DuplicateField { .. } | BackendError::DuplicateReview { .. } => {
                ErrorKind::Conflict
            }
            BackendError::Http(_) | BackendError::Status { .. } | BackendError::Parse(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// Conflicts that are a policy refusal rather than an input validation failure
    pub fn is_forbidden(&self) -> bool {
        matches!(self, BackendError::DuplicateReview { .. })
    }

    /// Shorthand for [`BackendError::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BackendError::InvalidArgument(message.into())
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
