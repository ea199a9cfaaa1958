//! HTTP adapter for [`RemoteServicePort`]
//!
//! Resolves an operation name to a path template from the route table, fills
//! positional `{n}` placeholders from the operation arguments, and issues a GET.
//! Transport errors and non-2xx statuses come back as
//! [`ApplicationError::Remote`] so the interceptor can classify them.

use std::collections::HashMap;
use std::time::Duration;

use application::ApplicationError;
use application::ports::RemoteServicePort;
use async_trait::async_trait;
use domain::{FailureCause, RemoteOperation};
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use crate::config::RemoteConfig;

/// Calls a collaborating service over HTTP
pub struct HttpRemoteAdapter {
    client: Client,
    base_url: Url,
    routes: HashMap<String, String>,
    service_name: String,
}

impl std::fmt::Debug for HttpRemoteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemoteAdapter")
            .field("base_url", &self.base_url.as_str())
            .field("routes", &self.routes.len())
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

impl HttpRemoteAdapter {
    /// Create an adapter for the configured remote
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig, service_name: impl Into<String>) -> Result<Self, ApplicationError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApplicationError::Configuration(format!("invalid remote base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApplicationError::Configuration(format!(
                "remote base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("failed to build HTTP client: {e}")))?;

        // Config sources may lowercase keys; match operation names case-insensitively
        let routes = config
            .routes
            .iter()
            .map(|(name, path)| (name.to_ascii_lowercase(), path.clone()))
            .collect();

        Ok(Self {
            client,
            base_url,
            routes,
            service_name: service_name.into(),
        })
    }

    /// Build the request URL for an operation
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidOperation`] if no route is configured
    /// or a placeholder has no matching argument.
    pub fn resolve_url(&self, operation: &RemoteOperation) -> Result<Url, ApplicationError> {
        let template = self
            .routes
            .get(&operation.name().to_ascii_lowercase())
            .ok_or_else(|| {
                ApplicationError::InvalidOperation(format!(
                    "no route configured for operation '{}'",
                    operation.name()
                ))
            })?;

        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| fill_placeholders(s, operation))
            .collect::<Result<Vec<_>, _>>()?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApplicationError::Configuration(format!("remote base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Replace every `{n}` in a path segment with the n-th operation argument
fn fill_placeholders(segment: &str, operation: &RemoteOperation) -> Result<String, ApplicationError> {
    let mut filled = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        let index = rest[open + 1..close].parse::<usize>().map_err(|_| {
            ApplicationError::InvalidOperation(format!(
                "route placeholder '{}' for '{}' is not a positional index",
                &rest[open..=close],
                operation.name()
            ))
        })?;
        let value = operation.args().get(index).ok_or_else(|| {
            ApplicationError::InvalidOperation(format!(
                "operation '{}' is missing argument {index}",
                operation.name()
            ))
        })?;
        filled.push_str(&rest[..open]);
        filled.push_str(value);
        rest = &rest[close + 1..];
    }
    filled.push_str(rest);
    Ok(filled)
}

fn describe_transport(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

#[async_trait]
impl RemoteServicePort for HttpRemoteAdapter {
    #[instrument(skip(self, operation), fields(operation = %operation.name(), service = %self.service_name))]
    async fn call(&self, operation: &RemoteOperation) -> Result<String, ApplicationError> {
        let url = self.resolve_url(operation)?;
        debug!(url = %url, "Sending remote request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FailureCause::transport(describe_transport(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(FailureCause::status(status.as_u16(), reason).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| FailureCause::transport(describe_transport(&e)))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Remote request succeeded");
        Ok(body)
    }

    fn service_name(&self) -> String {
        self.service_name.clone()
    }
}
