use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::services::session::ChatSessionService;

pub struct ChatState {
    pub session: Arc<ChatSessionService>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

pub async fn send_message(
    State(state): State<Arc<ChatState>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is required".to_string()));
    }
    let reply = state.session.send_message(&request.text).await;
    Ok(Json(json!({ "reply": reply })))
}

pub async fn get_transcript(
    State(state): State<Arc<ChatState>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "transcript": state.session.transcript() })))
}

pub async fn clear_transcript(
    State(state): State<Arc<ChatState>>,
) -> Result<Json<Value>, AppError> {
    state.session.clear();
    Ok(Json(json!({ "transcript": state.session.transcript() })))
}
