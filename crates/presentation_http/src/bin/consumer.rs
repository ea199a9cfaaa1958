//! Consumer server - calls the provider service through the resilience layer

use std::time::Duration;

use infrastructure::{AppConfig, LogFormat, build_provider_client, init_logging};
use presentation_http::{ConsumerState, routes, server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the format can be honoured
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let format = config.server.log_format.parse().unwrap_or(LogFormat::Text);
    init_logging(
        format,
        "consumer_server=debug,presentation_http=info,application=info,infrastructure=info,tower_http=debug",
    )?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("🛰️ consumer v{} starting...", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    info!(
        host = %config.server.host,
        port = %config.server.port,
        remote = %config.remote.base_url,
        environment = %config.environment(),
        "Configuration loaded"
    );

    let client = build_provider_client(&config)?;
    let state = ConsumerState::new(client, config.server.service_name.clone(), config.server.port);
    let app = routes::create_consumer_router(state);

    server::serve(
        app,
        &config.server.host,
        config.server.port,
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await
}
