//! Entities - call-scoped records flowing through the resilience pipeline

mod failure;
mod fallback;
mod remote_operation;

pub use failure::{FailureCause, FailureRecord};
pub use fallback::{FallbackBranch, FallbackResponse, UNKNOWN_SUBJECT};
pub use remote_operation::RemoteOperation;
