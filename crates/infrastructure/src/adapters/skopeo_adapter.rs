//! `skopeo` adapter for [`ImageRegistryPort`]
//!
//! Runs the tool directly with an argument vector (no shell). Output is stdout
//! followed by stderr; a non-zero exit is reported in [`CommandOutput`], not as
//! an error. Only failing to start the process is an error.

use std::path::Path;

use application::ApplicationError;
use application::ports::{CommandOutput, ImageRegistryPort, RegistryCredentials};
use async_trait::async_trait;
use domain::ImageReference;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::config::SkopeoConfig;

/// Drives the `skopeo` CLI
#[derive(Debug, Clone)]
pub struct SkopeoAdapter {
    config: SkopeoConfig,
}

impl SkopeoAdapter {
    /// Create an adapter with the given tool settings
    pub const fn new(config: SkopeoConfig) -> Self {
        Self { config }
    }

    /// Arguments for `skopeo inspect`
    pub fn inspect_args(&self, image: &ImageReference, credentials: &RegistryCredentials) -> Vec<String> {
        vec![
            "inspect".to_string(),
            format!("--tls-verify={}", self.config.tls_verify),
            "--creds".to_string(),
            credentials.colon_pair(),
            image.docker_uri(),
        ]
    }

    /// Arguments for `skopeo copy` from a docker archive
    pub fn copy_args(
        &self,
        archive: &Path,
        image: &ImageReference,
        credentials: &RegistryCredentials,
    ) -> Vec<String> {
        let mut args = vec!["copy".to_string()];
        if let Some(policy) = &self.config.policy_path {
            args.push("--policy".to_string());
            args.push(policy.clone());
        }
        args.extend([
            format!("--src-tls-verify={}", self.config.tls_verify),
            format!("--dest-tls-verify={}", self.config.tls_verify),
            format!("--dest-creds={}", credentials.colon_pair()),
            format!("docker-archive:{}", archive.display()),
            image.docker_uri(),
        ]);
        args
    }

    async fn run(&self, args: Vec<String>) -> Result<CommandOutput, ApplicationError> {
        let output = Command::new(&self.config.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ApplicationError::ExternalCommand(format!("failed to run '{}': {e}", self.config.binary))
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let result = CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            output: text,
        };
        if result.success {
            debug!(exit_code = ?result.exit_code, "Registry command finished");
        } else {
            warn!(exit_code = ?result.exit_code, "Registry command failed");
        }
        Ok(result)
    }
}

#[async_trait]
impl ImageRegistryPort for SkopeoAdapter {
    #[instrument(skip(self, credentials), fields(image = %image))]
    async fn inspect(
        &self,
        image: &ImageReference,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError> {
        self.run(self.inspect_args(image, credentials)).await
    }

    #[instrument(skip(self, credentials), fields(image = %image, archive = %archive.display()))]
    async fn push_archive(
        &self,
        archive: &Path,
        image: &ImageReference,
        credentials: &RegistryCredentials,
    ) -> Result<CommandOutput, ApplicationError> {
        self.run(self.copy_args(archive, image, credentials)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageReference {
        ImageReference::parse("192.168.50.103/flow/cust-cont:v1").unwrap()
    }

    fn creds() -> RegistryCredentials {
        RegistryCredentials::new("flow", "pw")
    }

    #[test]
    fn inspect_argument_vector() {
        let adapter = SkopeoAdapter::new(SkopeoConfig::default());
        assert_eq!(
            adapter.inspect_args(&image(), &creds()),
            vec![
                "inspect",
                "--tls-verify=false",
                "--creds",
                "flow:pw",
                "docker://192.168.50.103/flow/cust-cont:v1",
            ]
        );
    }

    #[test]
    fn copy_argument_vector_with_policy() {
        let adapter = SkopeoAdapter::new(SkopeoConfig {
            policy_path: Some("/etc/containers/policy.json".into()),
            tls_verify: true,
            ..SkopeoConfig::default()
        });
        let args = adapter.copy_args(Path::new("/tmp/app.tar"), &image(), &creds());
        assert_eq!(
            args,
            vec![
                "copy",
                "--policy",
                "/etc/containers/policy.json",
                "--src-tls-verify=true",
                "--dest-tls-verify=true",
                "--dest-creds=flow:pw",
                "docker-archive:/tmp/app.tar",
                "docker://192.168.50.103/flow/cust-cont:v1",
            ]
        );
    }

    #[test]
    fn copy_without_policy_omits_flag() {
        let adapter = SkopeoAdapter::new(SkopeoConfig::default());
        let args = adapter.copy_args(Path::new("/tmp/app.tar"), &image(), &creds());
        assert!(!args.iter().any(|a| a == "--policy"));
        assert_eq!(args[0], "copy");
    }

    #[tokio::test]
    async fn missing_binary_is_external_command_error() {
        let adapter = SkopeoAdapter::new(SkopeoConfig {
            binary: "/nonexistent/skopeo-binary".into(),
            ..SkopeoConfig::default()
        });
        let result = adapter.inspect(&image(), &creds()).await;
        assert!(matches!(result, Err(ApplicationError::ExternalCommand(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_exit_status_and_output() {
        let adapter = SkopeoAdapter::new(SkopeoConfig {
            binary: "echo".into(),
            ..SkopeoConfig::default()
        });
        let output = adapter.inspect(&image(), &creds()).await.unwrap();
        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert!(output.output.starts_with("inspect --tls-verify=false"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_not_an_error() {
        let adapter = SkopeoAdapter::new(SkopeoConfig {
            binary: "false".into(),
            ..SkopeoConfig::default()
        });
        let output = adapter.inspect(&image(), &creds()).await.unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(1));
    }
}
