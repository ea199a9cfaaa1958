//! API error handling
//!
//! The last stop for failures that were not degraded. Classified remote
//! failures keep their 1:1 status; local faults become a generic 500 so no
//! implementation detail leaks.

use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{FailureKind, FailureRecord};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ApiResponse;

/// Message returned for uncaught internal faults
pub const INTERNAL_SYSTEM_ERROR: &str = "internal system error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Classified remote failure surfaced without fallback
    #[error("Remote call failed ({kind}): {message}")]
    Remote { kind: FailureKind, message: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Surface a classified failure
    ///
    /// A failure that never reached the remote and has no known kind is a
    /// local fault and is reported as internal.
    pub fn from_failure(failure: &FailureRecord) -> Self {
        if failure.kind() == FailureKind::Unknown && failure.status_code().is_none() {
            return Self::Internal(failure.reason().to_string());
        }
        Self::Remote {
            kind: failure.kind(),
            message: failure.reason().to_string(),
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Remote { kind, .. } => {
                StatusCode::from_u16(kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            },
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Render as the response envelope, logging the failure
    ///
    /// Internal faults are logged in full and reported only as
    /// [`INTERNAL_SYSTEM_ERROR`].
    pub fn into_envelope(self) -> ApiResponse {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!(detail = %detail, "Unhandled internal fault");
                INTERNAL_SYSTEM_ERROR.to_string()
            },
            Self::Remote { kind, message } => {
                warn!(kind = %kind, status = status.as_u16(), reason = %message, "Surfacing remote failure");
                message
            },
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::ServiceUnavailable(msg) => msg,
        };

        ApiResponse::failure(status.as_u16(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, self.into_envelope()).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::Remote(cause) => Self::Remote {
                kind: cause.kind(),
                message: cause.reason().to_string(),
            },
            ApplicationError::Cancelled => Self::ServiceUnavailable("request cancelled".into()),
            ApplicationError::ExternalCommand(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
