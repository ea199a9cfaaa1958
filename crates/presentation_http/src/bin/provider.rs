//! Demo provider server - the remote side the consumer calls

use std::time::Duration;

use infrastructure::{AppConfig, LogFormat, init_logging};
use presentation_http::{ProviderState, routes, server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let format = config.server.log_format.parse().unwrap_or(LogFormat::Text);
    init_logging(format, "provider_server=debug,presentation_http=info,tower_http=debug")?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("📦 provider v{} starting...", env!("CARGO_PKG_VERSION"));

    let provider = config.provider_service.clone();
    info!(
        host = %provider.host,
        port = %provider.port,
        service = %provider.service_name,
        "Configuration loaded"
    );

    let host = provider.host.clone();
    let port = provider.port;
    let app = routes::create_provider_router(ProviderState::new(provider));

    server::serve(
        app,
        &host,
        port,
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await
}
