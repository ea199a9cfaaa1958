//! Call interceptor
//!
//! Wraps every outbound remote call: attempt, classify failures, retry transient
//! ones with backoff, and once the remote is given up on, either synthesize a
//! fallback response or surface the classified failure.
//!
//! ```text
//! Attempting --ok--> Success
//! Attempting --err(transient, under cap)--> Retrying --delay--> Attempting
//! Attempting --err(otherwise)--> Exhausted --fallback on--> Degraded
//!                                          --fallback off-> Failed
//! ```

use std::convert::Infallible;
use std::sync::Arc;

use domain::{FailureKind, FailureRecord, FallbackResponse, RemoteOperation};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use super::error_classifier::ErrorClassifier;
use super::fallback_responder::FallbackResponder;
use super::retry_policy::{RetryDecision, RetryPolicy};
use crate::error::ApplicationError;
use crate::ports::RemoteServicePort;

/// Lifecycle states of one logical call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    /// A request is in flight
    Attempting,
    /// Waiting before the next attempt
    Retrying,
    /// The remote has been given up on
    Exhausted,
    /// Producing a degraded answer
    FallingBack,
    /// Terminal: the remote returned a payload
    Success,
    /// Terminal: a fallback response was returned
    Degraded,
    /// Terminal: the classified failure was surfaced
    Failed,
}

impl CallState {
    /// Whether no further transitions happen from this state
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Degraded | Self::Failed)
    }
}

/// Final result of one logical call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The remote returned a payload
    Success {
        /// Result text from the remote
        payload: String,
        /// Attempts made, including the successful one
        attempts: u32,
    },
    /// A fallback response replaced the remote result
    Degraded {
        /// The synthesized answer
        response: FallbackResponse,
        /// The classified failure behind it
        failure: FailureRecord,
        /// Attempts made
        attempts: u32,
    },
    /// Fallback is disabled and the classified failure is surfaced
    Failed {
        /// The classified failure
        failure: FailureRecord,
        /// Attempts made
        attempts: u32,
    },
}

impl CallOutcome {
    /// Terminal state reached
    #[must_use]
    pub const fn final_state(&self) -> CallState {
        match self {
            Self::Success { .. } => CallState::Success,
            Self::Degraded { .. } => CallState::Degraded,
            Self::Failed { .. } => CallState::Failed,
        }
    }

    /// Number of attempts made against the remote
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. }
            | Self::Degraded { attempts, .. }
            | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// True only for a real remote result
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Remote payload, if the call succeeded
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Classified failure, if the call did not succeed
    pub const fn failure(&self) -> Option<&FailureRecord> {
        match self {
            Self::Success { .. } => None,
            Self::Degraded { failure, .. } | Self::Failed { failure, .. } => Some(failure),
        }
    }

    /// Failure kind, if the call did not succeed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure().map(FailureRecord::kind)
    }

    /// Text to show a caller: the payload, the fallback message, or the failure reason
    pub fn message(&self) -> &str {
        match self {
            Self::Success { payload, .. } => payload,
            Self::Degraded { response, .. } => response.message(),
            Self::Failed { failure, .. } => failure.reason(),
        }
    }
}

/// Resilience wrapper around a [`RemoteServicePort`]
///
/// Holds no per-call mutable state; concurrent calls through one interceptor
/// are independent.
pub struct CallInterceptor {
    remote: Arc<dyn RemoteServicePort>,
    policy: RetryPolicy,
    classifier: ErrorClassifier,
    responder: FallbackResponder,
    fallback_enabled: bool,
}

impl std::fmt::Debug for CallInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallInterceptor")
            .field("remote", &self.remote.service_name())
            .field("policy", &self.policy)
            .field("fallback_enabled", &self.fallback_enabled)
            .finish_non_exhaustive()
    }
}

impl CallInterceptor {
    /// Create an interceptor with fallback enabled
    pub fn new(remote: Arc<dyn RemoteServicePort>, policy: RetryPolicy) -> Self {
        Self {
            remote,
            policy,
            classifier: ErrorClassifier::new(),
            responder: FallbackResponder::new(),
            fallback_enabled: true,
        }
    }

    /// Turn fallback responses on or off
    #[must_use]
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    /// Whether failures are answered with fallback responses
    #[must_use]
    pub const fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Retry policy in effect
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Name of the wrapped remote service
    pub fn service_name(&self) -> String {
        self.remote.service_name()
    }

    /// Run the operation to a terminal outcome
    ///
    /// Never fails: every error path ends in [`CallOutcome::Degraded`] or
    /// [`CallOutcome::Failed`].
    pub async fn invoke(&self, operation: &RemoteOperation) -> CallOutcome {
        let Ok(outcome) = self
            .run(operation, std::future::pending::<Infallible>())
            .await;
        outcome
    }

    /// Run the operation, giving up early if `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Cancelled`] if the token is cancelled before a
    /// terminal outcome is reached, whether during an attempt or a retry wait.
    pub async fn invoke_with_cancellation(
        &self,
        operation: &RemoteOperation,
        cancel: &CancellationToken,
    ) -> Result<CallOutcome, ApplicationError> {
        let cancelled = async {
            cancel.cancelled().await;
            ApplicationError::Cancelled
        };
        self.run(operation, cancelled).await
    }

    /// Attempt loop; `interrupt` resolving ends the call with its value
    #[instrument(skip(self, operation, interrupt), fields(operation = %operation.name(), service = %self.remote.service_name()))]
    async fn run<E>(
        &self,
        operation: &RemoteOperation,
        interrupt: impl Future<Output = E>,
    ) -> Result<CallOutcome, E> {
        tokio::pin!(interrupt);
        let mut state = self.policy.start();

        loop {
            let attempt = state.begin_attempt();
            debug!(attempt, state = ?CallState::Attempting, "Calling remote");

            let result = tokio::select! {
                biased;
                err = &mut interrupt => {
                    debug!(attempt, "Call cancelled during attempt");
                    return Err(err);
                }
                result = self.remote.call(operation) => result,
            };

            let err = match result {
                Ok(payload) => {
                    if attempt > 1 {
                        debug!(attempts = attempt, "Remote call succeeded after retry");
                    }
                    return Ok(CallOutcome::Success {
                        payload,
                        attempts: attempt,
                    });
                },
                Err(err) => err,
            };

            let failure = self.classifier.record(&err, operation);
            match state.decide(failure.kind()) {
                RetryDecision::Retry { delay } => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        delay_ms = delay.as_millis(),
                        kind = %failure.kind(),
                        state = ?CallState::Retrying,
                        "Remote call failed, retrying"
                    );
                    tokio::select! {
                        biased;
                        err = &mut interrupt => {
                            debug!(attempt, "Call cancelled during retry wait");
                            return Err(err);
                        }
                        () = tokio::time::sleep(delay) => {}
                    }
                    state.record_wait(delay);
                },
                RetryDecision::Stop => {
                    if failure.kind().is_transient() {
                        warn!(
                            attempts = attempt,
                            waited_ms = state.waited().as_millis(),
                            kind = %failure.kind(),
                            state = ?CallState::Exhausted,
                            "Remote call failed after all retry attempts"
                        );
                    }
                    return Ok(self.settle(failure, attempt));
                },
            }
        }
    }

    fn settle(&self, failure: FailureRecord, attempts: u32) -> CallOutcome {
        if self.fallback_enabled {
            debug!(state = ?CallState::FallingBack, "Falling back");
            let response = self.responder.respond(failure.operation(), &failure);
            CallOutcome::Degraded {
                response,
                failure,
                attempts,
            }
        } else {
            CallOutcome::Failed { failure, attempts }
        }
    }
}
