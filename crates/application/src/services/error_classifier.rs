//! Error classifier
//!
//! Labels a failed remote call with one [`FailureKind`]. Classification is total:
//! status codes follow the fixed mapping, transport failures are `Unavailable`,
//! and anything the outbound port reports that is not a remote failure becomes
//! `Unknown`.

use domain::{FailureCause, FailureKind, FailureRecord, RemoteOperation};
use tracing::warn;

use crate::error::ApplicationError;

/// Maps failure causes to the failure taxonomy and logs every classification
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Create a classifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify a remote failure cause
    pub fn classify(&self, cause: &FailureCause, operation: &RemoteOperation) -> FailureKind {
        let kind = cause.kind();
        warn!(
            operation = %operation.name(),
            status = ?cause.status_code(),
            reason = %cause.reason(),
            kind = %kind,
            "Remote call failed"
        );
        kind
    }

    /// Build the failure record for any error returned by the outbound port
    pub fn record(&self, error: &ApplicationError, operation: &RemoteOperation) -> FailureRecord {
        match error.remote_cause() {
            Some(cause) => {
                let kind = self.classify(cause, operation);
                FailureRecord::new(kind, cause.status_code(), cause.reason(), operation.clone())
            },
            None => {
                warn!(
                    operation = %operation.name(),
                    error = %error,
                    kind = %FailureKind::Unknown,
                    "Local fault during remote call"
                );
                FailureRecord::new(
                    FailureKind::Unknown,
                    None,
                    error.to_string(),
                    operation.clone(),
                )
            },
        }
    }
}
