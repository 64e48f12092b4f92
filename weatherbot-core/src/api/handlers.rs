use axum::Json;
use axum::extract::State;

use super::state::SharedState;
use crate::model::{ChatRequest, ChatResponse, StatusMessage};

pub const STATUS_MESSAGE: &str = "Weather Chatbot API is running";

/// GET /
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: STATUS_MESSAGE.to_string(),
    })
}

/// POST /chat
///
/// Always answers 200; lookup failures come back as text in `response`.
pub async fn chat(
    State(state): State<SharedState>,
    Json(input): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.chat.reply(&input.message).await)
}
