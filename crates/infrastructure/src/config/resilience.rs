//! Outbound call configuration: remote target, routes, fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Remote Target Configuration
// ==============================

/// Where outbound calls go and how operation names map to paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 3)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Operation name to path template; `{0}`, `{1}` are positional arguments
    #[serde(default = "default_routes")]
    pub routes: HashMap<String, String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_connect_timeout() -> u64 {
    3
}

fn default_routes() -> HashMap<String, String> {
    [
        ("getInfo", "/provider/info"),
        ("getUserById", "/provider/user/{0}"),
        ("health", "/provider/health"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            routes: default_routes(),
        }
    }
}

// ==============================
// Fallback Configuration
// ==============================

/// Fallback (degraded mode) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackAppConfig {
    /// Answer exhausted calls with a fallback response instead of an error
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for FallbackAppConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
