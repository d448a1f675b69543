use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_utils::clock::Clock;

use crate::models::ProviderSearchQuery;
use crate::services::directory::ProviderDirectory;

pub struct ProviderState {
    pub directory: Arc<ProviderDirectory>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

pub async fn search_providers(
    State(state): State<Arc<ProviderState>>,
    Query(query): Query<ProviderSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let providers = state.directory.search(&query);
    let total = providers.len();
    Ok(Json(json!({
        "providers": providers,
        "total": total,
    })))
}

pub async fn get_provider(
    State(state): State<Arc<ProviderState>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let provider = state
        .directory
        .get(provider_id)
        .map_err(|_| AppError::NotFound("Provider not found".to_string()))?;
    Ok(Json(json!({ "provider": provider })))
}

pub async fn get_provider_slots(
    State(state): State<Arc<ProviderState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let availability = state
        .directory
        .available_slots(provider_id, query.date, state.clock.today())
        .map_err(|_| AppError::NotFound("Provider not found".to_string()))?;
    Ok(Json(json!({ "availability": availability })))
}
