//! Server startup and graceful shutdown shared by both binaries

use std::{sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Wrap a router with tracing and CORS, bind, and serve until a shutdown signal
pub async fn serve(app: Router, host: &str, port: u16, shutdown_timeout: Duration) -> anyhow::Result<()> {
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    serve_until(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Serve on `listener` until `signal` completes, then drain for at most `drain_timeout`
///
/// Connections still open when the drain window closes are abandoned.
pub async fn serve_until<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    S: Future<Output = ()>,
{
    let drain = Arc::new(Notify::new());
    let drain_started = Arc::clone(&drain);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { drain_started.notified().await })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        () = signal => {}
    }

    // Stores a permit, so the drain starts even if the server has not polled yet
    drain.notify_one();
    info!("⏳ Waiting up to {:?} for connections to close...", drain_timeout);

    match tokio::time::timeout(drain_timeout, server).await {
        Ok(result) => result?,
        Err(_) => warn!(
            timeout_secs = drain_timeout.as_secs_f64(),
            "Shutdown timeout elapsed, abandoning open connections"
        ),
    }
    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
