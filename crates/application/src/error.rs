//! Application-level errors

use domain::{DomainError, FailureCause};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Remote call failed at the transport or with an error status
    #[error("Remote call failed: {0}")]
    Remote(FailureCause),

    /// Operation cannot be issued (e.g. no route configured)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// External command could not be run
    #[error("External command failed: {0}")]
    ExternalCommand(String),

    /// Caller cancelled the call before it completed
    #[error("Call cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Remote(cause) => cause.kind().is_transient(),
            _ => false,
        }
    }

    /// Remote failure cause, if this error carries one
    pub const fn remote_cause(&self) -> Option<&FailureCause> {
        match self {
            Self::Remote(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<FailureCause> for ApplicationError {
    fn from(cause: FailureCause) -> Self {
        Self::Remote(cause)
    }
}
