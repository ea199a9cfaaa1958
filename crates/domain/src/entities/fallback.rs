//! Degraded-mode responses
//!
//! A [`FallbackResponse`] is a locally synthesized answer returned in place of a
//! remote result. Each response comes from one [`FallbackBranch`], and every branch
//! owns a fixed marker phrase that appears verbatim in its message. The marker table
//! here is the only one in the workspace; consumers that can only see text use
//! [`FallbackBranch::detect`] instead of keeping their own list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::FailureKind;

/// Placeholder used when a user-lookup call carried no identifier
pub const UNKNOWN_SUBJECT: &str = "unknown";

/// The responder branch that produced a fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackBranch {
    /// Health check against an unavailable service
    HealthUnavailable,
    /// User lookup against an unavailable service
    UserUnavailable,
    /// Any other call against an unavailable service
    ServiceUnavailable,
    /// User lookup answered with not-found
    UserNotFound,
    /// Any other call answered with not-found
    ResourceNotFound,
    /// Remote failed internally
    InternalError,
    /// Every remaining failure kind
    CallFailed,
}

impl FallbackBranch {
    /// Branches ordered so that more specific markers are tested first
    pub const DETECTION_ORDER: [Self; 7] = [
        Self::HealthUnavailable,
        Self::UserUnavailable,
        Self::ServiceUnavailable,
        Self::UserNotFound,
        Self::ResourceNotFound,
        Self::InternalError,
        Self::CallFailed,
    ];

    /// Marker phrase contained in every message of this branch
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::HealthUnavailable => "health check failed",
            Self::UserUnavailable => "user service temporarily unavailable",
            Self::ServiceUnavailable => "service temporarily unavailable",
            Self::UserNotFound => "user not found",
            Self::ResourceNotFound => "resource not found",
            Self::InternalError => "internal service error",
            Self::CallFailed => "service call failed",
        }
    }

    /// Whether the message embeds the call's subject identifier
    #[must_use]
    pub const fn mentions_subject(&self) -> bool {
        matches!(self, Self::UserUnavailable | Self::UserNotFound)
    }

    /// Render the human-readable message for this branch
    ///
    /// `subject` is only used by branches that mention it; pass
    /// [`UNKNOWN_SUBJECT`] when the call had no identifier.
    #[must_use]
    pub fn message(&self, subject: &str) -> String {
        match self {
            Self::HealthUnavailable => {
                "health check failed, service temporarily unavailable".to_string()
            },
            Self::UserUnavailable => {
                format!("user service temporarily unavailable, user ID: {subject}")
            },
            Self::ServiceUnavailable => "service temporarily unavailable, retry later".to_string(),
            Self::UserNotFound => format!("user not found, user ID: {subject}"),
            Self::ResourceNotFound => "requested resource not found".to_string(),
            Self::InternalError => "internal service error, contact administrator".to_string(),
            Self::CallFailed => "service call failed, retry later".to_string(),
        }
    }

    /// Identify the branch whose marker appears in `text`
    ///
    /// Only meant for consumers that receive bare text. A genuine payload that happens
    /// to contain a marker is misdetected; callers holding a [`FallbackResponse`] or a
    /// `success` flag should use that instead.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|branch| text.contains(branch.marker()))
    }
}

impl fmt::Display for FallbackBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Degraded-mode answer produced without contacting the remote service
///
/// The type itself is the failure tag: a caller holding a `FallbackResponse`
/// never confuses it with a real payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackResponse {
    branch: FallbackBranch,
    kind: FailureKind,
    message: String,
}

impl FallbackResponse {
    /// Render a response for the given branch
    pub fn new(branch: FallbackBranch, kind: FailureKind, subject: Option<&str>) -> Self {
        let message = branch.message(subject.unwrap_or(UNKNOWN_SUBJECT));
        Self {
            branch,
            kind,
            message,
        }
    }

    /// Branch that produced this response
    #[must_use]
    pub const fn branch(&self) -> FallbackBranch {
        self.branch
    }

    /// Failure kind the response stands in for
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Human-readable degraded message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume into the message text
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for FallbackResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
