use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::ScreeningError;
use crate::services::screening::ScreeningService;

pub struct ScreeningState {
    pub screening: Arc<ScreeningService>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct OneShotRequest {
    pub responses: HashMap<String, String>,
}

pub async fn start_screening(
    State(state): State<Arc<ScreeningState>>,
) -> Result<Json<Value>, AppError> {
    let session = state.screening.start_session();
    Ok(Json(json!({
        "session": session,
        "questions": state.screening.questionnaire().questions(),
    })))
}

pub async fn record_answer(
    State(state): State<Arc<ScreeningState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .screening
        .record_answer(session_id, &request.question_id, &request.answer)
        .map_err(map_screening_error)?;
    Ok(Json(json!({ "result": result })))
}

pub async fn submit_screening(
    State(state): State<Arc<ScreeningState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .screening
        .submit(session_id)
        .map_err(map_screening_error)?;
    Ok(Json(json!({
        "complete": result.complete,
        "crisis_flag": result.crisis_flag,
        "crisis_advisory": result.crisis_advisory,
    })))
}

/// One-shot variant: answer map in, completeness and crisis outcome back.
pub async fn submit_screening_one_shot(
    State(state): State<Arc<ScreeningState>>,
    Json(request): Json<OneShotRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .screening
        .submit_screening(&request.responses)
        .map_err(map_screening_error)?;
    Ok(Json(json!({
        "complete": result.complete,
        "crisis_flag": result.crisis_flag,
        "crisis_advisory": result.crisis_advisory,
    })))
}

fn map_screening_error(err: ScreeningError) -> AppError {
    match err {
        ScreeningError::SessionNotFound => AppError::NotFound(err.to_string()),
        ScreeningError::AlreadySubmitted => AppError::Conflict(err.to_string()),
        ScreeningError::UnknownQuestion(_) | ScreeningError::InvalidAnswer { .. } => {
            AppError::BadRequest(err.to_string())
        }
    }
}
