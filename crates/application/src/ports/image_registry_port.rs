//! Image registry port
//!
//! Interface to the external registry tool used to inspect and push images.
//! The tool is opaque: results are its exit status and merged text output.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use domain::ImageReference;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::ApplicationError;

/// Registry login
#[derive(Clone)]
pub struct RegistryCredentials {
    username: String,
    password: SecretString,
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl RegistryCredentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// `user:password` form expected by registry tooling
    pub fn colon_pair(&self) -> String {
        format!("{}:{}", self.username, self.password.expose_secret())
    }
}

/// Result of running the external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Whether the tool exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// Standard output followed by standard error
    pub output: String,
}

/// Port for registry image operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageRegistryPort: Send + Sync {
    /// Inspect an image in the registry
    async fn inspect(
        &self,
        image: &ImageReference,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError>;

    /// Push a local image archive (tar) to the registry
    async fn push_archive(
        &self,
        archive: &Path,
        image: &ImageReference,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError>;
}
