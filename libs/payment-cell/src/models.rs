use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in cents (the charge amount times 100).
    pub amount: i64,
    pub currency: String,
    pub status: PaymentIntentStatus,
    pub client_secret: String,
    pub created_at: DateTime<Utc>,
}

impl PaymentIntent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            PaymentIntentStatus::Succeeded | PaymentIntentStatus::Canceled
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    Succeeded,
    Canceled,
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentIntentStatus::RequiresPaymentMethod => write!(f, "requires_payment_method"),
            PaymentIntentStatus::Succeeded => write!(f, "succeeded"),
            PaymentIntentStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Card details captured for shape only. The simulator checks presence and
/// length bounds, never digits; nothing here is charged or stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodDetails {
    pub card_number: String,
    pub cvc: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub cardholder_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPaymentMethod {
    pub id: String,
    pub method_type: String,
    pub card_brand: String,
    pub card_last4: String,
    pub exp_month: u32,
    pub exp_year: i32,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Payment intent not found: {0}")]
    IntentNotFound(String),

    #[error("Payment intent {0} is already finalized")]
    IntentFinalized(String),

    #[error("Invalid payment method: {0}")]
    InvalidCard(String),
}
