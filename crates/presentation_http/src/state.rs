//! Application state shared across handlers

use std::sync::Arc;

use application::ProviderClient;
use infrastructure::ProviderServiceConfig;

/// Consumer service state
#[derive(Debug, Clone)]
pub struct ConsumerState {
    /// Resilient client for the provider service
    pub client: ProviderClient,
    /// This service's logical name
    pub service_name: Arc<str>,
    /// Port this service listens on
    pub port: u16,
}

impl ConsumerState {
    /// Create consumer state
    pub fn new(client: ProviderClient, service_name: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            client,
            service_name: service_name.into(),
            port,
        }
    }
}

/// Demo provider service state
#[derive(Debug, Clone)]
pub struct ProviderState {
    /// Provider configuration
    pub config: Arc<ProviderServiceConfig>,
}

impl ProviderState {
    /// Create provider state
    pub fn new(config: ProviderServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
