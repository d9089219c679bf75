//! AgentStatuette chat server
//!
//! Exposes `POST /api/chat`, forwarding messages to the agent runtime, and
//! `GET /health`.

mod config;
mod routes;
mod state;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "statuette_server=debug,agent_runner=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    if config.echo_mode {
        tracing::warn!("Echo mode enabled, messages will not reach the agent runtime");
    } else {
        tracing::info!("Using agent runtime at {}", config.agent_runtime_url);
    }
    tracing::info!("Wallet data file: {:?}", config.wallet_data_file);

    let addr = config.bind_addr();
    let app = routes::router()
        .with_state(AppState::new(config))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Chat API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
