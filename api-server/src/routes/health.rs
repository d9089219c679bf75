//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    network_id: String,
    agent_runtime_url: String,
    echo_mode: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.config();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        network_id: config.network_id.clone(),
        agent_runtime_url: config.agent_runtime_url.clone(),
        echo_mode: config.echo_mode,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
