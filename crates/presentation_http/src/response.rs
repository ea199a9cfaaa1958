//! Response envelope and outcome translation
//!
//! Every JSON body leaving the consumer service has the same shape:
//! `{success, message, code, timestamp, data?}`. Degraded outcomes are reported
//! with HTTP 200 and `success: false`; surfaced failures go through
//! [`ApiError`] and carry the mapped status.

use application::CallOutcome;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Message used by data-style endpoints when the remote call succeeded
pub const CALL_SUCCEEDED: &str = "call succeeded";

/// Uniform response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// False for degraded and failed calls
    pub success: bool,
    /// Human-readable result or failure text
    pub message: String,
    /// HTTP-style status describing the outcome
    pub code: u16,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Payload for data-style endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Successful result
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: 200,
            timestamp: now_millis(),
            data: None,
        }
    }

    /// Unsuccessful result with the given status code
    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code,
            timestamp: now_millis(),
            data: None,
        }
    }

    /// Attach a payload (`Value::Null` renders an explicit `"data": null`)
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Translate an outcome into a message-style envelope
///
/// `render` formats the payload on success and the fallback text when
/// degraded. A `Failed` outcome becomes an [`ApiError`] with the mapped status.
pub fn translate<F>(outcome: &CallOutcome, render: F) -> Result<ApiResponse, ApiError>
where
    F: FnOnce(&str) -> String,
{
    match outcome {
        CallOutcome::Success { payload, .. } => Ok(ApiResponse::success(render(payload))),
        CallOutcome::Degraded { response, .. } => Ok(ApiResponse::failure(
            response.kind().http_status(),
            render(response.message()),
        )),
        CallOutcome::Failed { failure, .. } => Err(ApiError::from_failure(failure)),
    }
}

/// Translate an outcome into a data-style envelope
///
/// On success the payload goes into `data`; when degraded `data` is null and
/// `message` holds the fallback text.
pub fn translate_with_data(outcome: &CallOutcome) -> Result<ApiResponse, ApiError> {
    match outcome {
        CallOutcome::Success { payload, .. } => {
            Ok(ApiResponse::success(CALL_SUCCEEDED).with_data(payload.as_str()))
        },
        CallOutcome::Degraded { response, .. } => {
            Ok(ApiResponse::failure(response.kind().http_status(), response.message())
                .with_data(Value::Null))
        },
        CallOutcome::Failed { failure, .. } => Err(ApiError::from_failure(failure)),
    }
}
