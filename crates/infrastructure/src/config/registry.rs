//! Registry tool configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external `skopeo` binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkopeoConfig {
    /// Binary name or path
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Signature policy file passed to `copy` (tool default when unset)
    #[serde(default)]
    pub policy_path: Option<String>,

    /// Verify registry TLS certificates
    #[serde(default)]
    pub tls_verify: bool,
}

fn default_binary() -> String {
    "skopeo".to_string()
}

impl Default for SkopeoConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            policy_path: None,
            tls_verify: false,
        }
    }
}
