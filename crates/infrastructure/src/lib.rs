//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: an HTTP adapter for
//! remote calls and a `skopeo` adapter for registry operations, plus layered
//! configuration and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{
    AppConfig, Environment, FallbackAppConfig, ProviderServiceConfig, RemoteConfig, ServerConfig,
    SkopeoConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
pub use wiring::{build_image_service, build_provider_client};
