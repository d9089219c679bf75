//! Route handlers

pub mod chat;
pub mod health;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(error: impl std::fmt::Display) -> RouteError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

pub fn internal_error(error: impl std::fmt::Display) -> RouteError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// All API routes
pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).merge(chat::router())
}
