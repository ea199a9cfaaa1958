//! Bounded retry policy with capped backoff
//!
//! Only transient failures (`Unavailable`: transport errors and 502/503/504) are
//! retried. The delay before retry `n` is `initial_delay * multiplier^(n-1)`,
//! capped at `max_delay`; there is no jitter, so delays never decrease.
//!
//! # Example
//!
//! ```rust
//! use application::services::{RetryConfig, RetryDecision, RetryPolicy};
//! use domain::FailureKind;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(RetryConfig::default()).unwrap();
//! assert_eq!(
//!     policy.should_retry(1, FailureKind::Unavailable),
//!     RetryDecision::Retry { delay: Duration::from_millis(1000) }
//! );
//! assert_eq!(policy.should_retry(1, FailureKind::NotFound), RetryDecision::Stop);
//! assert_eq!(policy.should_retry(3, FailureKind::Unavailable), RetryDecision::Stop);
//! ```

use std::time::Duration;

use domain::FailureKind;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds (default: 1000ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Ceiling for any single delay in milliseconds (default: 3000ms)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays (default: 1.5)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Total attempts including the original call (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

const fn default_initial_delay() -> u64 {
    1000
}

const fn default_max_delay() -> u64 {
    3000
}

const fn default_multiplier() -> f64 {
    1.5
}

const fn default_max_attempts() -> u32 {
    3
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom parameters
    #[must_use]
    pub const fn new(
        initial_delay_ms: u64,
        max_delay_ms: u64,
        multiplier: f64,
        max_attempts: u32,
    ) -> Self {
        Self {
            initial_delay_ms,
            max_delay_ms,
            multiplier,
            max_attempts,
        }
    }

    /// Short delays for local development and tests
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            initial_delay_ms: 10,
            max_delay_ms: 50,
            multiplier: 2.0,
            max_attempts: 3,
        }
    }

    /// A single attempt, never retried
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            initial_delay_ms: 0,
            max_delay_ms: 0,
            multiplier: 1.0,
            max_attempts: 1,
        }
    }

    /// Check the bounds are usable
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] when `max_attempts` is zero,
    /// the ceiling is below the initial delay, or the multiplier shrinks delays.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_attempts == 0 {
            return Err(ApplicationError::Configuration(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ApplicationError::Configuration(format!(
                "retry.max_delay_ms ({}) is below retry.initial_delay_ms ({})",
                self.max_delay_ms, self.initial_delay_ms
            )));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ApplicationError::Configuration(format!(
                "retry.multiplier must be a finite number >= 1.0, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }

    /// Delay before retry number `retry` (1-based: the wait after the first failure is retry 1)
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let base = (self.initial_delay_ms as f64) * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }
}

/// Whether to re-attempt a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then attempt again
    Retry {
        /// Time to wait before the next attempt
        delay: Duration,
    },
    /// Give up on the remote
    Stop,
}

impl RetryDecision {
    /// True for [`RetryDecision::Retry`]
    #[must_use]
    pub const fn should_retry(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }

    /// Delay to wait, if retrying
    #[must_use]
    pub const fn delay(&self) -> Option<Duration> {
        match self {
            Self::Retry { delay } => Some(*delay),
            Self::Stop => None,
        }
    }
}

/// Decides per failed attempt whether to retry, and after what delay
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a policy from validated bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`RetryConfig::validate`].
    pub fn new(config: RetryConfig) -> Result<Self, ApplicationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Bounds in effect
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Maximum attempts per logical call, including the first
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Decide after `attempts` calls have been made and the last one failed with `kind`
    #[must_use]
    pub fn should_retry(&self, attempts: u32, kind: FailureKind) -> RetryDecision {
        if attempts >= self.config.max_attempts || !kind.is_transient() {
            return RetryDecision::Stop;
        }
        RetryDecision::Retry {
            delay: self.config.delay_for_attempt(attempts.max(1)),
        }
    }

    /// Fresh per-call state
    #[must_use]
    pub const fn start(&self) -> RetryState {
        RetryState {
            policy: *self,
            attempts: 0,
            waited: Duration::ZERO,
        }
    }
}

/// Attempt bookkeeping for one logical call
///
/// Owned by a single call; never shared.
#[derive(Debug, Clone)]
pub struct RetryState {
    policy: RetryPolicy,
    attempts: u32,
    waited: Duration,
}

impl RetryState {
    /// Count a new attempt and return its 1-based number
    pub const fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Attempts made so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Total time spent waiting between attempts
    #[must_use]
    pub const fn waited(&self) -> Duration {
        self.waited
    }

    /// Whether the attempt cap has been reached
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.attempts >= self.policy.max_attempts()
    }

    /// Decide what to do after the current attempt failed with `kind`
    #[must_use]
    pub fn decide(&self, kind: FailureKind) -> RetryDecision {
        self.policy.should_retry(self.attempts, kind)
    }

    /// Record a completed wait
    pub fn record_wait(&mut self, delay: Duration) {
        self.waited += delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(RetryConfig::default()).unwrap()
    }

    #[test]
    fn config_default_values() {
        let config = RetryConfig::default();
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 3000);
        assert!((config.multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn delay_grows_then_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(1).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 1500);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2250);
        assert_eq!(config.delay_for_attempt(4).as_millis(), 3000);
        assert_eq!(config.delay_for_attempt(50).as_millis(), 3000);
    }

    #[test]
    fn delays_are_monotonic_and_bounded() {
        let config = RetryConfig::default();
        let delays: Vec<_> = (1..20).map(|n| config.delay_for_attempt(n)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert!(delays.iter().all(|d| {
            (1000..=3000).contains(&d.as_millis())
        }));
    }

    #[test]
    fn huge_attempt_numbers_stay_capped() {
        let config = RetryConfig::new(100, 1000, 2.0, u32::MAX);
        assert_eq!(config.delay_for_attempt(u32::MAX).as_millis(), 1000);
    }

    #[test]
    fn retries_unavailable_within_cap() {
        let policy = policy();
        for attempt in 1..3 {
            let decision = policy.should_retry(attempt, FailureKind::Unavailable);
            assert!(decision.should_retry(), "attempt {attempt}");
            let delay = decision.delay().unwrap().as_millis();
            assert!((1000..=3000).contains(&delay));
        }
    }

    #[test]
    fn stops_at_attempt_cap_regardless_of_kind() {
        let policy = policy();
        for kind in FailureKind::ALL {
            assert_eq!(policy.should_retry(3, kind), RetryDecision::Stop);
            assert_eq!(policy.should_retry(4, kind), RetryDecision::Stop);
        }
    }

    #[test]
    fn never_retries_answered_failures() {
        let policy = policy();
        for kind in [
            FailureKind::BadRequest,
            FailureKind::Unauthorized,
            FailureKind::Forbidden,
            FailureKind::NotFound,
            FailureKind::InternalError,
            FailureKind::Unknown,
        ] {
            assert_eq!(policy.should_retry(1, kind), RetryDecision::Stop, "{kind}");
        }
    }

    #[test]
    fn validate_rejects_bad_bounds() {
        assert!(RetryConfig::new(1000, 3000, 1.5, 0).validate().is_err());
        assert!(RetryConfig::new(3000, 1000, 1.5, 3).validate().is_err());
        assert!(RetryConfig::new(1000, 3000, 0.5, 3).validate().is_err());
        assert!(RetryConfig::new(1000, 3000, f64::NAN, 3).validate().is_err());
        assert!(RetryConfig::default().validate().is_ok());
        assert!(RetryConfig::no_retry().validate().is_ok());
        assert!(RetryPolicy::new(RetryConfig::new(1, 1, 1.0, 0)).is_err());
    }

    #[test]
    fn state_tracks_attempts_and_waits() {
        let policy = RetryPolicy::new(RetryConfig::fast()).unwrap();
        let mut state = policy.start();
        assert_eq!(state.begin_attempt(), 1);
        assert!(state.decide(FailureKind::Unavailable).should_retry());
        state.record_wait(Duration::from_millis(10));
        assert_eq!(state.begin_attempt(), 2);
        assert_eq!(state.begin_attempt(), 3);
        assert!(state.is_exhausted());
        assert_eq!(state.decide(FailureKind::Unavailable), RetryDecision::Stop);
        assert_eq!(state.attempts(), 3);
        assert_eq!(state.waited(), Duration::from_millis(10));
    }

    #[test]
    fn no_retry_config_stops_immediately() {
        let policy = RetryPolicy::new(RetryConfig::no_retry()).unwrap();
        assert_eq!(policy.should_retry(1, FailureKind::Unavailable), RetryDecision::Stop);
    }

    #[test]
    fn config_deserialization_fills_defaults() {
        let json = r#"{"max_attempts":5}"#;
        let config: RetryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 3000);
    }
}
