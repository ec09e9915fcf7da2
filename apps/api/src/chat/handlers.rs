use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat
///
/// 400 when `message` is missing or blank; 200 otherwise, even when the AI
/// provider fails (the reply is then a fixed apology).
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let message = request.message.unwrap_or_default();

    let response = state.chat.respond(&message).await?;
    Ok(Json(ChatResponse { response }))
}

/// POST /api/admin/chat/context/refresh
///
/// Drops the cached context block so the next chat request rebuilds it from
/// the current content.
pub async fn handle_refresh_context(State(state): State<AppState>) -> StatusCode {
    state.chat.cache().invalidate().await;
    StatusCode::NO_CONTENT
}
