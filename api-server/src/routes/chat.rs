//! Chat endpoint

use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use statuette_core::chat::{ChatReply, ChatRequest};

use super::{bad_request, internal_error, RouteError};
use crate::state::AppState;

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, RouteError> {
    let request_id = Uuid::new_v4();

    async move {
        if req.message.trim().is_empty() {
            return Err(bad_request("Message must not be empty"));
        }

        match state.executor().process_chat_message(&req.message).await {
            Ok(responses) => {
                info!("Chat processed with {} responses", responses.len());
                Ok(Json(ChatReply { responses }))
            }
            Err(e) => {
                error!("Error processing chat message: {}", e);
                Err(internal_error(format!("Failed to process message: {}", e)))
            }
        }
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
