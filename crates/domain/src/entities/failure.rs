//! Failure causes and classified failure records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RemoteOperation;
use crate::value_objects::FailureKind;

/// Why a remote call did not produce a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureCause {
    /// The remote answered with an error status
    Status {
        /// HTTP-style status code
        code: u16,
        /// Reason phrase or short body excerpt
        reason: String,
    },
    /// No response was received (connection refused, timeout, reset)
    Transport {
        /// Description of the transport error
        description: String,
    },
}

impl FailureCause {
    /// Create a status failure
    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            code,
            reason: reason.into(),
        }
    }

    /// Create a transport failure
    pub fn transport(description: impl Into<String>) -> Self {
        Self::Transport {
            description: description.into(),
        }
    }

    /// Status code, if the remote answered at all
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Transport { .. } => None,
        }
    }

    /// Reason string for logs
    pub fn reason(&self) -> &str {
        match self {
            Self::Status { reason, .. } => reason,
            Self::Transport { description } => description,
        }
    }

    /// Failure kind implied by this cause
    ///
    /// Transport failures never reached the remote and are always `Unavailable`.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Status { code, .. } => FailureKind::from_status(*code),
            Self::Transport { .. } => FailureKind::Unavailable,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code, reason } => write!(f, "status {code}: {reason}"),
            Self::Transport { description } => write!(f, "transport failure: {description}"),
        }
    }
}

/// A classified failure, tied to the operation that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    kind: FailureKind,
    status_code: Option<u16>,
    reason: String,
    operation: RemoteOperation,
}

impl FailureRecord {
    /// Build a record from an explicit kind
    pub fn new(
        kind: FailureKind,
        status_code: Option<u16>,
        reason: impl Into<String>,
        operation: RemoteOperation,
    ) -> Self {
        Self {
            kind,
            status_code,
            reason: reason.into(),
            operation,
        }
    }

    /// Build a record whose kind is derived from the cause
    pub fn from_cause(cause: &FailureCause, operation: RemoteOperation) -> Self {
        Self::new(
            cause.kind(),
            cause.status_code(),
            cause.reason(),
            operation,
        )
    }

    /// Assigned failure kind
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Originating status code, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Originating reason
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Operation that failed
    pub const fn operation(&self) -> &RemoteOperation {
        &self.operation
    }
}
