//! Consumer endpoints: call the provider and report the result as text

use axum::extract::{Path, State};

use crate::{
    error::ApiError,
    response::{ApiResponse, translate},
    state::ConsumerState,
};

fn call_result(state: &ConsumerState, text: &str) -> String {
    format!(
        "consumer[{}:{}] call result: {text}",
        state.service_name, state.port
    )
}

/// `GET /consumer/info`
pub async fn info(State(state): State<ConsumerState>) -> Result<ApiResponse, ApiError> {
    let outcome = state.client.get_info().await;
    translate(&outcome, |text| call_result(&state, text))
}

/// `GET /consumer/user/{id}`
pub async fn user_by_id(
    State(state): State<ConsumerState>,
    Path(id): Path<String>,
) -> Result<ApiResponse, ApiError> {
    let outcome = state.client.get_user_by_id(&id).await;
    translate(&outcome, |text| call_result(&state, text))
}

/// `GET /consumer/health`
pub async fn health(State(state): State<ConsumerState>) -> Result<ApiResponse, ApiError> {
    let outcome = state.client.health().await;
    translate(&outcome, |text| {
        format!("consumer healthy, provider status: {text}")
    })
}
