//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: consumer and demo provider HTTP servers
//! - `resilience`: outbound target, operation routes, fallback
//! - `registry`: external registry tool
//!
//! Retry bounds use [`application::RetryConfig`] directly.

mod registry;
mod resilience;
mod server;

use std::fmt;

use application::{ApplicationError, RetryConfig, RetryPolicy};
use serde::{Deserialize, Serialize};

pub use registry::SkopeoConfig;
pub use resilience::{FallbackAppConfig, RemoteConfig};
pub use server::{ProviderServiceConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `MESHCALL__RETRY__MAX_ATTEMPTS=5`
pub const ENV_PREFIX: &str = "MESHCALL";

/// Separator between prefix and nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
///
/// Immutable once loaded; services receive the pieces they need by value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Consumer server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Demo provider server configuration
    #[serde(default)]
    pub provider_service: ProviderServiceConfig,

    /// Outbound remote target
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Retry bounds for outbound calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Fallback behaviour for outbound calls
    #[serde(default)]
    pub fallback: FallbackAppConfig,

    /// Registry tool configuration
    #[serde(default)]
    pub skopeo: SkopeoConfig,
}

impl AppConfig {
    /// Load configuration from defaults, optional `config.toml`, and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`AppConfig::load`] but with an explicit file name (extension optional)
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(file, None)
    }

    /// Layered load; `env` replaces the process environment when given
    fn load_layered(
        file: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8081)?
            .set_default("remote.base_url", "http://127.0.0.1:8080")?;

        // Seed routes so an override adds to the table instead of replacing it
        for (name, path) in RemoteConfig::default().routes {
            builder = builder.set_default(format!("remote.routes.{name}"), path)?;
        }

        let config = builder
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., MESHCALL__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Parse configuration from TOML text, without file or environment sources
    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Check values that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] for invalid retry bounds, an
    /// unparsable remote base URL, or an empty route table.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.retry.validate()?;
        reqwest::Url::parse(&self.remote.base_url).map_err(|e| {
            ApplicationError::Configuration(format!(
                "remote.base_url '{}' is not a valid URL: {e}",
                self.remote.base_url
            ))
        })?;
        if self.remote.routes.is_empty() {
            return Err(ApplicationError::Configuration(
                "remote.routes must map at least one operation".into(),
            ));
        }
        Ok(())
    }

    /// Retry policy built from the configured bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the retry bounds are invalid.
    pub fn retry_policy(&self) -> Result<RetryPolicy, ApplicationError> {
        RetryPolicy::new(self.retry)
    }
}

#[cfg(test)]
mod tests {
    use domain::RemoteOperation;

    use super::*;
    use crate::adapters::HttpRemoteAdapter;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(AppConfig::default().environment(), Environment::Development);
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.service_name, "service-consumer");
        assert_eq!(config.server.log_format, "text");
        assert_eq!(config.provider_service.port, 8080);
        assert_eq!(config.provider_service.service_name, "service-provider");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert!(config.fallback.enabled);
        assert_eq!(config.skopeo.binary, "skopeo");
        assert!(!config.skopeo.tls_verify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_toml_overrides_sections() {
        let config = AppConfig::from_toml(
            r#"
            environment = "production"

            [server]
            port = 9001

            [retry]
            max_attempts = 5
            initial_delay_ms = 200

            [fallback]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.service_name, "service-consumer");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_delay_ms, 200);
        assert_eq!(config.retry.max_delay_ms, 3000);
        assert!(!config.fallback.enabled);
        assert_eq!(config.remote.routes.len(), 3);
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = AppConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
        assert!(config.retry_policy().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.remote.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_routes() {
        let mut config = AppConfig::default();
        config.remote.routes.clear();
        assert!(config.validate().is_err());
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> String {
        let path = dir.path().join("meshcall.toml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn load_uses_defaults_without_file_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = AppConfig::load_layered(&missing.to_string_lossy(), env(&[])).unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.remote.routes.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_config(
            &dir,
            r#"
            [server]
            port = 9100

            [retry]
            max_attempts = 4
            "#,
        );

        let config = AppConfig::load_layered(&file, env(&[])).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.retry.max_attempts, 4);
    }

    #[test]
    fn env_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_config(
            &dir,
            r#"
            [retry]
            max_attempts = 4

            [fallback]
            enabled = true
            "#,
        );

        let config = AppConfig::load_layered(
            &file,
            env(&[
                ("MESHCALL__RETRY__MAX_ATTEMPTS", "5"),
                ("MESHCALL__FALLBACK__ENABLED", "false"),
                ("MESHCALL__SERVER__PORT", "9200"),
                ("UNRELATED__RETRY__MAX_ATTEMPTS", "9"),
            ]),
        )
        .unwrap();

        assert_eq!(config.retry.max_attempts, 5);
        assert!(!config.fallback.enabled);
        assert_eq!(config.server.port, 9200);
    }

    #[test]
    fn env_route_extends_default_table() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_config(&dir, "");

        let config = AppConfig::load_layered(
            &file,
            env(&[("MESHCALL__REMOTE__ROUTES__GETORDER", "/provider/order/{0}")]),
        )
        .unwrap();

        let adapter = HttpRemoteAdapter::new(&config.remote, "service-provider").unwrap();
        let order = adapter
            .resolve_url(&RemoteOperation::new("getOrder").with_arg("7"))
            .unwrap();
        assert_eq!(order.path(), "/provider/order/7");
        let info = adapter
            .resolve_url(&RemoteOperation::new("getInfo"))
            .unwrap();
        assert_eq!(info.path(), "/provider/info");
        assert_eq!(config.remote.routes.len(), 4);
    }

    #[test]
    fn serializes_round_trip_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.remote.routes, config.remote.routes);
    }
}
