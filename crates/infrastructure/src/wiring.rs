//! Assembly of application services from configuration

use std::sync::Arc;

use application::{ApplicationError, CallInterceptor, ImageService, ProviderClient};
use tracing::info;

use crate::adapters::{HttpRemoteAdapter, SkopeoAdapter};
use crate::config::AppConfig;

/// Build the resilient provider client described by `config`
///
/// # Errors
///
/// Returns an error if the retry bounds or the remote target are invalid.
pub fn build_provider_client(config: &AppConfig) -> Result<ProviderClient, ApplicationError> {
    let policy = config.retry_policy()?;
    let remote = HttpRemoteAdapter::new(&config.remote, config.provider_service.service_name.clone())?;
    let interceptor = CallInterceptor::new(Arc::new(remote), policy).with_fallback(config.fallback.enabled);

    info!(
        base_url = %config.remote.base_url,
        max_attempts = config.retry.max_attempts,
        fallback = config.fallback.enabled,
        "Provider client ready"
    );
    Ok(ProviderClient::new(Arc::new(interceptor)))
}

/// Build the image service backed by the configured `skopeo` binary
pub fn build_image_service(config: &AppConfig) -> ImageService {
    ImageService::new(Arc::new(SkopeoAdapter::new(config.skopeo.clone())))
}
