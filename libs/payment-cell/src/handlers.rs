use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use shared_models::error::AppError;

use crate::models::{PaymentError, PaymentMethodDetails};
use crate::services::gateway::PaymentGatewayService;

pub struct PaymentState {
    pub gateway: Arc<PaymentGatewayService>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub payment_method: PaymentMethodDetails,
}

pub async fn create_payment_intent(
    State(state): State<Arc<PaymentState>>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<Value>, AppError> {
    let intent = state
        .gateway
        .create_intent(request.amount, &request.currency)
        .map_err(map_payment_error)?;
    Ok(Json(json!({ "intent": intent })))
}

pub async fn confirm_payment(
    State(state): State<Arc<PaymentState>>,
    Path(intent_id): Path<String>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .gateway
        .confirm(&intent_id, &request.payment_method)
        .await
        .map_err(map_payment_error)?;

    // Declines are a normal result with a retry affordance, not an error status.
    Ok(Json(json!({
        "success": outcome.success,
        "error": outcome.error,
    })))
}

pub async fn cancel_payment(
    State(state): State<Arc<PaymentState>>,
    Path(intent_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let intent = state
        .gateway
        .cancel_intent(&intent_id)
        .map_err(map_payment_error)?;
    Ok(Json(json!({ "intent": intent })))
}

fn map_payment_error(err: PaymentError) -> AppError {
    match err {
        PaymentError::InvalidAmount => {
            warn!("Payment contract violation: {}", err);
            AppError::BadRequest(err.to_string())
        }
        PaymentError::InvalidCard(_) => AppError::BadRequest(err.to_string()),
        PaymentError::IntentNotFound(_) => AppError::NotFound(err.to_string()),
        PaymentError::IntentFinalized(_) => AppError::Conflict(err.to_string()),
    }
}
