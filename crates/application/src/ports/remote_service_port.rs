//! Remote service port
//!
//! The only contract the resilience layer needs from the transport: invoke a named
//! operation with its arguments and get back either the result text or a failure.

use async_trait::async_trait;
use domain::RemoteOperation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for calling a collaborating service
///
/// Implementations report transport and status failures as
/// [`ApplicationError::Remote`]; any other error is treated as a local fault.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteServicePort: Send + Sync {
    /// Invoke the operation once, without retrying
    async fn call(&self, operation: &RemoteOperation) -> Result<String, ApplicationError>;

    /// Name of the remote service, for logs
    fn service_name(&self) -> String;
}
