//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Consumer HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logical service name, shown in response messages
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8081
}

fn default_service_name() -> String {
    "service-consumer".to_string()
}

const fn default_shutdown_timeout() -> u64 {
    30
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            log_format: default_log_format(),
        }
    }
}

/// Demo provider server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderServiceConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_provider_port")]
    pub port: u16,

    /// Logical service name, shown in response messages
    #[serde(default = "default_provider_name")]
    pub service_name: String,

    /// Application name reported by `/provider/config`
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Database name reported by `/provider/config`
    #[serde(default = "default_database")]
    pub database: String,
}

const fn default_provider_port() -> u16 {
    8080
}

fn default_provider_name() -> String {
    "service-provider".to_string()
}

fn default_app_name() -> String {
    "service-provider-app".to_string()
}

fn default_database() -> String {
    "demo".to_string()
}

impl Default for ProviderServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_provider_port(),
            service_name: default_provider_name(),
            app_name: default_app_name(),
            database: default_database(),
        }
    }
}
