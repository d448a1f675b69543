use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use payment_cell::models::{PaymentError, PaymentMethodDetails};
use provider_cell::models::ProviderError;
use shared_models::error::AppError;

use crate::models::{BookingError, DraftUpdate, PersonalInfo, SessionType};
use crate::services::wizard::BookingWizardService;

pub struct BookingState {
    pub wizard: Arc<BookingWizardService>,
}

#[derive(Debug, Deserialize)]
pub struct StartDraftRequest {
    pub provider_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdvanceRequest {
    pub payment_method: Option<PaymentMethodDetails>,
}

#[derive(Debug, Deserialize)]
pub struct BookAppointmentRequest {
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub session_type: SessionType,
    pub reason: String,
    pub personal: PersonalInfo,
    pub payment_method: PaymentMethodDetails,
}

pub async fn start_draft(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<StartDraftRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = state
        .wizard
        .start_draft(request.provider_id)
        .map_err(map_booking_error)?;
    Ok(Json(json!({ "draft": draft })))
}

pub async fn get_draft(
    State(state): State<Arc<BookingState>>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let draft = state.wizard.get_draft(draft_id).map_err(map_booking_error)?;
    Ok(Json(json!({ "draft": draft })))
}

pub async fn update_draft(
    State(state): State<Arc<BookingState>>,
    Path(draft_id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<Value>, AppError> {
    let draft = state
        .wizard
        .update_draft(draft_id, update)
        .map_err(map_booking_error)?;
    Ok(Json(json!({ "draft": draft })))
}

pub async fn advance_draft(
    State(state): State<Arc<BookingState>>,
    Path(draft_id): Path<Uuid>,
    request: Option<Json<AdvanceRequest>>,
) -> Result<Json<Value>, AppError> {
    let payment_method = request.and_then(|Json(r)| r.payment_method);
    let outcome = state
        .wizard
        .advance(draft_id, payment_method)
        .await
        .map_err(map_booking_error)?;
    Ok(Json(json!({ "outcome": outcome })))
}

pub async fn retreat_draft(
    State(state): State<Arc<BookingState>>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let draft = state.wizard.retreat(draft_id).map_err(map_booking_error)?;
    Ok(Json(json!({ "draft": draft })))
}

pub async fn abandon_draft(
    State(state): State<Arc<BookingState>>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.wizard.abandon(draft_id).map_err(map_booking_error)?;
    Ok(Json(json!({ "abandoned": true })))
}

pub async fn book_appointment(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state
        .wizard
        .book_appointment(
            request.provider_id,
            request.date,
            &request.time,
            request.session_type,
            &request.reason,
            request.personal,
            request.payment_method,
        )
        .await
        .map_err(map_booking_error)?;
    Ok(Json(json!({ "result": result })))
}

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::DraftNotFound => AppError::NotFound(err.to_string()),
        BookingError::PaymentInFlight => AppError::Conflict(err.to_string()),
        BookingError::Provider(ProviderError::NotFound) => AppError::NotFound(err.to_string()),
        BookingError::Payment(PaymentError::InvalidAmount)
        | BookingError::Payment(PaymentError::InvalidCard(_)) => {
            warn!("Rejected booking payment input: {}", err);
            AppError::BadRequest(err.to_string())
        }
        BookingError::Payment(PaymentError::IntentNotFound(_)) => {
            AppError::NotFound(err.to_string())
        }
        BookingError::Payment(PaymentError::IntentFinalized(_)) => {
            AppError::Conflict(err.to_string())
        }
    }
}
