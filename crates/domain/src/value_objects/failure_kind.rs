//! Failure taxonomy for remote calls
//!
//! Every failed remote call is labelled with exactly one [`FailureKind`].
//!
//! # Examples
//!
//! ```
//! use domain::FailureKind;
//!
//! assert_eq!(FailureKind::from_status(404), FailureKind::NotFound);
//! assert_eq!(FailureKind::from_status(503), FailureKind::Unavailable);
//! assert_eq!(FailureKind::from_status(418), FailureKind::Unknown);
//! assert_eq!(FailureKind::Forbidden.http_status(), 403);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of failure classes a remote call can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 400 - the remote rejected the request parameters
    BadRequest,
    /// 401 - authentication failed
    Unauthorized,
    /// 403 - caller lacks permission
    Forbidden,
    /// 404 - the requested resource does not exist
    NotFound,
    /// 500 - the remote failed internally
    InternalError,
    /// 502/503/504 or no response at all (connection refused, timeout, reset)
    Unavailable,
    /// Any other status code
    Unknown,
}

impl FailureKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 7] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::InternalError,
        Self::Unavailable,
        Self::Unknown,
    ];

    /// Map a status code from a completed-but-erroneous response
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::InternalError,
            502..=504 => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    /// Status code exposed at the HTTP boundary for this kind
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InternalError | Self::Unknown => 500,
            Self::Unavailable => 503,
        }
    }

    /// Whether re-attempting the same call may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Stable snake_case label used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_status() {
        assert_eq!(FailureKind::from_status(400), FailureKind::BadRequest);
        assert_eq!(FailureKind::from_status(401), FailureKind::Unauthorized);
        assert_eq!(FailureKind::from_status(403), FailureKind::Forbidden);
        assert_eq!(FailureKind::from_status(404), FailureKind::NotFound);
        assert_eq!(FailureKind::from_status(500), FailureKind::InternalError);
        assert_eq!(FailureKind::from_status(502), FailureKind::Unavailable);
        assert_eq!(FailureKind::from_status(503), FailureKind::Unavailable);
        assert_eq!(FailureKind::from_status(504), FailureKind::Unavailable);
    }

    #[test]
    fn neighbours_of_known_codes_are_unknown() {
        for code in [0, 200, 402, 405, 429, 501, 505, 599] {
            assert_eq!(FailureKind::from_status(code), FailureKind::Unknown, "{code}");
        }
    }

    #[test]
    fn boundary_status_mapping() {
        assert_eq!(FailureKind::BadRequest.http_status(), 400);
        assert_eq!(FailureKind::Unauthorized.http_status(), 401);
        assert_eq!(FailureKind::Forbidden.http_status(), 403);
        assert_eq!(FailureKind::NotFound.http_status(), 404);
        assert_eq!(FailureKind::InternalError.http_status(), 500);
        assert_eq!(FailureKind::Unavailable.http_status(), 503);
        assert_eq!(FailureKind::Unknown.http_status(), 500);
    }

    #[test]
    fn only_unavailable_is_transient() {
        let transient: Vec<_> = FailureKind::ALL
            .iter()
            .filter(|k| k.is_transient())
            .collect();
        assert_eq!(transient, vec![&FailureKind::Unavailable]);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::InternalError).unwrap();
        assert_eq!(json, "\"internal_error\"");
        assert_eq!(FailureKind::NotFound.to_string(), "not_found");
    }
}
