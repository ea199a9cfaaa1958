//! Route definitions

use axum::{Router, routing::get};

use crate::{
    handlers,
    state::{ConsumerState, ProviderState},
};

/// Create the consumer service router
pub fn create_consumer_router(state: ConsumerState) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health::health_check))
        // Provider calls, text results
        .route("/consumer/info", get(handlers::consumer::info))
        .route("/consumer/user/{id}", get(handlers::consumer::user_by_id))
        .route("/consumer/health", get(handlers::consumer::health))
        // Provider calls, raw payload in `data`
        .route("/test/info", get(handlers::test::info))
        .route("/test/user/{id}", get(handlers::test::user_by_id))
        .route("/test/health", get(handlers::test::health))
        .route("/test/all", get(handlers::test::all))
        .fallback(handlers::not_found)
        // Attach state
        .with_state(state)
}

/// Create the demo provider service router
pub fn create_provider_router(state: ProviderState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/provider/info", get(handlers::provider::info))
        .route("/provider/user/{id}", get(handlers::provider::user_by_id))
        .route("/provider/health", get(handlers::provider::health))
        .route("/provider/config", get(handlers::provider::config))
        .fallback(handlers::not_found)
        .with_state(state)
}
