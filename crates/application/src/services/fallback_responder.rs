//! Fallback responder
//!
//! Synthesizes a degraded answer from the failure kind and a coarse category of
//! the operation name. No network access, no blocking, same input gives the
//! same message.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use domain::{FailureKind, FailureRecord, FallbackBranch, FallbackResponse, RemoteOperation};
use tracing::info;

/// Coarse grouping of operation names used to pick the fallback wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCategory {
    /// Name mentions "health"
    Health,
    /// Name mentions "user" (and not "health")
    UserLookup,
    /// Anything else
    Other,
}

const HEALTH_KEYWORD: usize = 0;
const USER_KEYWORD: usize = 1;

static OPERATION_KEYWORDS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["health", "user"])
        .expect("Failed to build operation keyword matcher")
});

impl OperationCategory {
    /// Categorize an operation name, case-insensitively; health wins over user
    #[must_use]
    pub fn of(name: &str) -> Self {
        let mut user = false;
        for found in OPERATION_KEYWORDS.find_iter(name) {
            match found.pattern().as_usize() {
                HEALTH_KEYWORD => return Self::Health,
                USER_KEYWORD => user = true,
                _ => {},
            }
        }
        if user { Self::UserLookup } else { Self::Other }
    }
}

/// Produces degraded-mode responses for failed calls
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    /// Create a responder
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pick the branch for a failure kind and operation category
    #[must_use]
    pub const fn select_branch(kind: FailureKind, category: OperationCategory) -> FallbackBranch {
        match (kind, category) {
            (FailureKind::Unavailable, OperationCategory::Health) => {
                FallbackBranch::HealthUnavailable
            },
            (FailureKind::Unavailable, OperationCategory::UserLookup) => {
                FallbackBranch::UserUnavailable
            },
            (FailureKind::Unavailable, OperationCategory::Other) => {
                FallbackBranch::ServiceUnavailable
            },
            (FailureKind::NotFound, OperationCategory::UserLookup) => FallbackBranch::UserNotFound,
            (FailureKind::NotFound, _) => FallbackBranch::ResourceNotFound,
            (FailureKind::InternalError, _) => FallbackBranch::InternalError,
            _ => FallbackBranch::CallFailed,
        }
    }

    /// Build the degraded response standing in for `operation`'s result
    pub fn respond(&self, operation: &RemoteOperation, failure: &FailureRecord) -> FallbackResponse {
        let category = OperationCategory::of(operation.name());
        let branch = Self::select_branch(failure.kind(), category);
        let response = FallbackResponse::new(branch, failure.kind(), operation.first_arg());
        info!(
            operation = %operation.name(),
            kind = %failure.kind(),
            branch = ?branch,
            "Serving fallback response"
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(name: &str, args: &[&str], kind: FailureKind) -> FallbackResponse {
        let op = RemoteOperation::with_args(name, args.iter().copied());
        let record = FailureRecord::new(kind, None, "x", op.clone());
        FallbackResponder::new().respond(&op, &record)
    }

    #[test]
    fn categorizes_operation_names() {
        assert_eq!(OperationCategory::of("health"), OperationCategory::Health);
        assert_eq!(OperationCategory::of("checkHEALTH"), OperationCategory::Health);
        assert_eq!(OperationCategory::of("getUserById"), OperationCategory::UserLookup);
        assert_eq!(OperationCategory::of("userHealth"), OperationCategory::Health);
        assert_eq!(OperationCategory::of("getInfo"), OperationCategory::Other);
        assert_eq!(OperationCategory::of(""), OperationCategory::Other);
    }

    #[test]
    fn user_not_found_mentions_id() {
        let resp = respond("getUserById", &["999"], FailureKind::NotFound);
        assert_eq!(resp.branch(), FallbackBranch::UserNotFound);
        assert_eq!(resp.message(), "user not found, user ID: 999");
    }

    #[test]
    fn unavailable_health_check() {
        let resp = respond("health", &[], FailureKind::Unavailable);
        assert_eq!(resp.branch(), FallbackBranch::HealthUnavailable);
        assert!(resp.message().contains("health check failed"));
    }

    #[test]
    fn unavailable_user_lookup_mentions_id() {
        let resp = respond("getUserById", &["42"], FailureKind::Unavailable);
        assert_eq!(resp.branch(), FallbackBranch::UserUnavailable);
        assert!(resp.message().contains("42"));
    }

    #[test]
    fn unavailable_other_operation() {
        let resp = respond("getInfo", &[], FailureKind::Unavailable);
        assert_eq!(resp.branch(), FallbackBranch::ServiceUnavailable);
    }

    #[test]
    fn not_found_other_operation() {
        let resp = respond("getInfo", &[], FailureKind::NotFound);
        assert_eq!(resp.message(), "requested resource not found");
    }

    #[test]
    fn internal_error_regardless_of_operation() {
        for name in ["getInfo", "getUserById", "health"] {
            let resp = respond(name, &["1"], FailureKind::InternalError);
            assert_eq!(resp.branch(), FallbackBranch::InternalError, "{name}");
        }
    }

    #[test]
    fn remaining_kinds_fall_through_to_call_failed() {
        for kind in [
            FailureKind::BadRequest,
            FailureKind::Unauthorized,
            FailureKind::Forbidden,
            FailureKind::Unknown,
        ] {
            let resp = respond("getUserById", &["1"], kind);
            assert_eq!(resp.branch(), FallbackBranch::CallFailed, "{kind}");
            assert_eq!(resp.kind(), kind);
        }
    }

    #[test]
    fn user_lookup_without_args_uses_unknown_subject() {
        let resp = respond("getUserById", &[], FailureKind::NotFound);
        assert_eq!(resp.message(), "user not found, user ID: unknown");
    }

    #[test]
    fn responses_are_deterministic() {
        let a = respond("getUserById", &["7"], FailureKind::Unavailable);
        let b = respond("getUserById", &["7"], FailureKind::Unavailable);
        assert_eq!(a, b);
    }

    #[test]
    fn every_response_is_detectable() {
        for kind in FailureKind::ALL {
            for name in ["getInfo", "getUserById", "health"] {
                let resp = respond(name, &["5"], kind);
                assert_eq!(FallbackBranch::detect(resp.message()), Some(resp.branch()));
            }
        }
    }
}
