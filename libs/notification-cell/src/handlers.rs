use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::NotificationError;
use crate::services::notifier::NotificationService;

pub struct NotificationState {
    pub notifier: Arc<NotificationService>,
}

pub async fn list_notifications(
    State(state): State<Arc<NotificationState>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "notifications": state.notifier.list(),
        "unread_count": state.notifier.unread_count(),
    })))
}

pub async fn mark_read(
    State(state): State<Arc<NotificationState>>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state
        .notifier
        .mark_read(notification_id)
        .map_err(map_notification_error)?;
    Ok(Json(json!({ "unread_count": state.notifier.unread_count() })))
}

pub async fn mark_all_read(
    State(state): State<Arc<NotificationState>>,
) -> Result<Json<Value>, AppError> {
    state.notifier.mark_all_read();
    Ok(Json(json!({ "unread_count": 0 })))
}

pub async fn remove_notification(
    State(state): State<Arc<NotificationState>>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state
        .notifier
        .remove(notification_id)
        .map_err(map_notification_error)?;
    Ok(Json(json!({ "unread_count": state.notifier.unread_count() })))
}

fn map_notification_error(err: NotificationError) -> AppError {
    match err {
        NotificationError::NotFound => AppError::NotFound(err.to_string()),
    }
}
