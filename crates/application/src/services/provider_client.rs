//! Typed facade over the provider service
//!
//! Each method only describes the operation; retry and fallback come from the
//! shared [`CallInterceptor`].

use std::sync::Arc;

use domain::RemoteOperation;
use tokio_util::sync::CancellationToken;

use super::call_interceptor::{CallInterceptor, CallOutcome};
use crate::error::ApplicationError;

/// Operation names understood by the provider service
pub mod operations {
    /// Service information
    pub const GET_INFO: &str = "getInfo";
    /// User lookup by identifier
    pub const GET_USER_BY_ID: &str = "getUserById";
    /// Provider health check
    pub const HEALTH: &str = "health";
}

/// Client for the provider service
#[derive(Debug, Clone)]
pub struct ProviderClient {
    interceptor: Arc<CallInterceptor>,
}

impl ProviderClient {
    /// Create a client on top of a configured interceptor
    pub const fn new(interceptor: Arc<CallInterceptor>) -> Self {
        Self { interceptor }
    }

    /// Underlying interceptor
    pub fn interceptor(&self) -> &CallInterceptor {
        &self.interceptor
    }

    /// Fetch provider service information
    pub async fn get_info(&self) -> CallOutcome {
        self.interceptor
            .invoke(&RemoteOperation::new(operations::GET_INFO))
            .await
    }

    /// Look up a user by identifier
    pub async fn get_user_by_id(&self, id: &str) -> CallOutcome {
        self.interceptor
            .invoke(&RemoteOperation::new(operations::GET_USER_BY_ID).with_arg(id))
            .await
    }

    /// Ask the provider for its health status
    pub async fn health(&self) -> CallOutcome {
        self.interceptor
            .invoke(&RemoteOperation::new(operations::HEALTH))
            .await
    }

    /// Invoke an arbitrary named operation
    pub async fn call(&self, operation: &RemoteOperation) -> CallOutcome {
        self.interceptor.invoke(operation).await
    }

    /// Invoke an arbitrary named operation, stopping early on cancellation
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Cancelled`] if `cancel` fires first.
    pub async fn call_with_cancellation(
        &self,
        operation: &RemoteOperation,
        cancel: &CancellationToken,
    ) -> Result<CallOutcome, ApplicationError> {
        self.interceptor
            .invoke_with_cancellation(operation, cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use domain::{FailureCause, FallbackBranch};

    use super::*;
    use crate::ports::MockRemoteServicePort;
    use crate::services::{CallState, RetryConfig, RetryPolicy};

    fn client(mock: MockRemoteServicePort) -> ProviderClient {
        let policy = RetryPolicy::new(RetryConfig::fast()).unwrap();
        ProviderClient::new(Arc::new(CallInterceptor::new(Arc::new(mock), policy)))
    }

    #[tokio::test]
    async fn get_user_by_id_passes_identifier() {
        let mut mock = MockRemoteServicePort::new();
        mock.expect_service_name()
            .returning(|| "service-provider".to_string());
        mock.expect_call()
            .withf(|op| op.name() == operations::GET_USER_BY_ID && op.first_arg() == Some("42"))
            .times(1)
            .returning(|_| Ok("user ID: 42".to_string()));

        let outcome = client(mock).get_user_by_id("42").await;
        assert_eq!(outcome.payload(), Some("user ID: 42"));
    }

    #[tokio::test]
    async fn get_info_has_no_arguments() {
        let mut mock = MockRemoteServicePort::new();
        mock.expect_service_name()
            .returning(|| "service-provider".to_string());
        mock.expect_call()
            .withf(|op| op.name() == operations::GET_INFO && op.args().is_empty())
            .times(1)
            .returning(|_| Ok("info".to_string()));

        assert!(client(mock).get_info().await.is_success());
    }

    #[tokio::test]
    async fn health_degrades_through_shared_fallback() {
        let mut mock = MockRemoteServicePort::new();
        mock.expect_service_name()
            .returning(|| "service-provider".to_string());
        mock.expect_call()
            .times(3)
            .returning(|_| Err(FailureCause::transport("connection refused").into()));

        let outcome = client(mock).health().await;
        assert_eq!(outcome.final_state(), CallState::Degraded);
        assert_eq!(
            FallbackBranch::detect(outcome.message()),
            Some(FallbackBranch::HealthUnavailable)
        );
    }

    #[tokio::test]
    async fn call_with_cancellation_reports_cancelled() {
        let mut mock = MockRemoteServicePort::new();
        mock.expect_service_name()
            .returning(|| "service-provider".to_string());
        mock.expect_call().times(0);

        let token = CancellationToken::new();
        token.cancel();
        let result = client(mock)
            .call_with_cancellation(&RemoteOperation::new(operations::GET_INFO), &token)
            .await;
        assert!(matches!(result, Err(ApplicationError::Cancelled)));
    }
}
