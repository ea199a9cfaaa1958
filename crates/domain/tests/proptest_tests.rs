//! Property-based tests for the failure taxonomy and fallback markers
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{FailureCause, FailureKind, FallbackBranch, FallbackResponse, ImageReference};
use proptest::prelude::*;

const MAPPED_CODES: [u16; 8] = [400, 401, 403, 404, 500, 502, 503, 504];

// ============================================================================
// FailureKind Property Tests
// ============================================================================

mod failure_kind_tests {
    use super::*;

    proptest! {
        #[test]
        fn unmapped_codes_are_unknown(code in any::<u16>()) {
            prop_assume!(!MAPPED_CODES.contains(&code));
            prop_assert_eq!(FailureKind::from_status(code), FailureKind::Unknown);
        }

        #[test]
        fn status_cause_kind_matches_code_mapping(code in any::<u16>(), reason in ".{0,32}") {
            let cause = FailureCause::status(code, reason);
            prop_assert_eq!(cause.kind(), FailureKind::from_status(code));
            prop_assert_eq!(cause.status_code(), Some(code));
        }

        #[test]
        fn transport_cause_is_always_unavailable(description in ".{0,64}") {
            let cause = FailureCause::transport(description);
            prop_assert_eq!(cause.kind(), FailureKind::Unavailable);
            prop_assert!(cause.status_code().is_none());
        }

        #[test]
        fn boundary_status_is_an_error_status(idx in 0usize..FailureKind::ALL.len()) {
            let status = FailureKind::ALL[idx].http_status();
            prop_assert!((400..600).contains(&status));
        }
    }
}

// ============================================================================
// Fallback Property Tests
// ============================================================================

mod fallback_tests {
    use super::*;

    proptest! {
        #[test]
        fn user_branches_embed_subject_verbatim(subject in "[a-zA-Z0-9_-]{1,24}") {
            for branch in [FallbackBranch::UserNotFound, FallbackBranch::UserUnavailable] {
                let resp = FallbackResponse::new(branch, FailureKind::NotFound, Some(&subject));
                prop_assert!(resp.message().contains(&subject));
                prop_assert_eq!(FallbackBranch::detect(resp.message()), Some(branch));
            }
        }

        #[test]
        fn rendering_is_deterministic(subject in ".{0,24}", idx in 0usize..7) {
            let branch = FallbackBranch::DETECTION_ORDER[idx];
            prop_assert_eq!(branch.message(&subject), branch.message(&subject));
        }
    }
}

// ============================================================================
// ImageReference Property Tests
// ============================================================================

mod image_reference_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_references_round_trip_through_display(
            host in "[a-z][a-z0-9]{0,10}",
            domain in "[a-z]{2,6}",
            port in proptest::option::of(1u32..65536),
            namespace in "[a-z0-9]{1,12}",
            repository in "[a-z0-9]{1,12}",
            tag in proptest::option::of("[a-zA-Z0-9_][a-zA-Z0-9._-]{0,20}")
        ) {
            let mut input = format!("{host}.{domain}");
            if let Some(port) = port {
                input.push_str(&format!(":{port}"));
            }
            input.push_str(&format!("/{namespace}/{repository}"));
            if let Some(tag) = &tag {
                input.push_str(&format!(":{tag}"));
            }

            let parsed = ImageReference::parse(&input);
            prop_assert!(parsed.is_ok(), "{}", input);
            let parsed = parsed.unwrap();
            prop_assert_eq!(parsed.to_string(), input);
            prop_assert_eq!(parsed.tag(), tag.as_deref());
        }

        #[test]
        fn single_component_names_are_rejected(name in "[a-z0-9]{1,12}", tag in "[a-z0-9]{1,8}") {
            let input = format!("{name}:{tag}");
            prop_assert!(!ImageReference::is_valid(&input));
        }
    }
}
