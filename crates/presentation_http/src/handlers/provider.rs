//! Demo provider endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::state::ProviderState;

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `GET /provider/info`
pub async fn info(State(state): State<ProviderState>) -> String {
    format!(
        "service name: {}, port: {}, time: {}",
        state.config.service_name,
        state.config.port,
        now()
    )
}

/// `GET /provider/user/{id}`
pub async fn user_by_id(State(state): State<ProviderState>, Path(id): Path<String>) -> String {
    format!(
        "user ID: {id}, from service: {}, port: {}",
        state.config.service_name, state.config.port
    )
}

/// `GET /provider/health`
pub async fn health() -> &'static str {
    "service running normally"
}

/// `GET /provider/config`
pub async fn config(State(state): State<ProviderState>) -> Json<Value> {
    Json(json!({
        "app.name": state.config.app_name,
        "database": state.config.database,
        "time": now(),
    }))
}
