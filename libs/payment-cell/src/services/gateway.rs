use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, info, warn};

use shared_config::AppConfig;

use crate::models::{
    ConfirmOutcome, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentMethodDetails,
    SavedPaymentMethod,
};

const DECLINE_MESSAGE: &str = "Payment failed. Please try again.";
const MAX_CARD_NUMBER_LEN: usize = 19;
const MAX_CVC_LEN: usize = 4;

/// Source of the weighted random draw deciding a confirmation outcome.
/// Injectable so tests can force success or decline deterministically.
pub trait OutcomeSource: Send + Sync {
    /// A value in `[0, 1)`; draws below the configured success rate succeed.
    fn draw(&self) -> f64;
}

pub struct RandomOutcome;

impl OutcomeSource for RandomOutcome {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

pub struct FixedOutcome(pub f64);

impl OutcomeSource for FixedOutcome {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Simulated payment gateway. Issues intents and resolves confirmations after
/// a mock delay; no real card processing happens anywhere in this service.
pub struct PaymentGatewayService {
    success_rate: f64,
    latency_ms: u64,
    outcomes: Arc<dyn OutcomeSource>,
    intents: Mutex<HashMap<String, PaymentIntent>>,
}

impl PaymentGatewayService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_outcomes(config, Arc::new(RandomOutcome))
    }

    pub fn with_outcomes(config: &AppConfig, outcomes: Arc<dyn OutcomeSource>) -> Self {
        Self {
            success_rate: config.payment_success_rate,
            latency_ms: config.simulated_latency_ms,
            outcomes,
            intents: Mutex::new(HashMap::new()),
        }
    }

    /// Create a payment intent for a charge. `amount` is in whole currency
    /// units; the intent records cents. Amounts at or below zero are rejected.
    pub fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, PaymentError> {
        if amount <= 0 {
            warn!("Rejected payment intent with non-positive amount {}", amount);
            return Err(PaymentError::InvalidAmount);
        }

        let id = format!("pi_{}", random_token(9));
        let intent = PaymentIntent {
            id: id.clone(),
            amount: amount * 100,
            currency: currency.to_string(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            client_secret: format!("{}_secret_{}", id, random_token(9)),
            created_at: Utc::now(),
        };

        self.intents
            .lock()
            .expect("intent map lock poisoned")
            .insert(id.clone(), intent.clone());

        debug!("Created payment intent {} for {} {}", id, amount, currency);
        Ok(intent)
    }

    pub fn get_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        self.intents
            .lock()
            .expect("intent map lock poisoned")
            .get(intent_id)
            .cloned()
            .ok_or_else(|| PaymentError::IntentNotFound(intent_id.to_string()))
    }

    /// Confirm an intent. Resolves after the simulated gateway delay with a
    /// weighted random outcome: a draw below the success rate succeeds, the
    /// rest decline with a generic message and the intent stays retryable.
    /// Finalized intents are never mutated.
    pub async fn confirm(
        &self,
        intent_id: &str,
        method: &PaymentMethodDetails,
    ) -> Result<ConfirmOutcome, PaymentError> {
        {
            let intents = self.intents.lock().expect("intent map lock poisoned");
            let intent = intents
                .get(intent_id)
                .ok_or_else(|| PaymentError::IntentNotFound(intent_id.to_string()))?;
            if intent.is_terminal() {
                return Err(PaymentError::IntentFinalized(intent_id.to_string()));
            }
        }

        validate_method_shape(method)?;

        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;

        if self.outcomes.draw() < self.success_rate {
            let mut intents = self.intents.lock().expect("intent map lock poisoned");
            // Re-check under the lock; a concurrent cancel may have finalized it.
            let intent = intents
                .get_mut(intent_id)
                .ok_or_else(|| PaymentError::IntentNotFound(intent_id.to_string()))?;
            if intent.is_terminal() {
                return Err(PaymentError::IntentFinalized(intent_id.to_string()));
            }
            intent.status = PaymentIntentStatus::Succeeded;
            info!("Payment intent {} succeeded", intent_id);
            Ok(ConfirmOutcome {
                success: true,
                error: None,
            })
        } else {
            info!("Payment intent {} declined", intent_id);
            Ok(ConfirmOutcome {
                success: false,
                error: Some(DECLINE_MESSAGE.to_string()),
            })
        }
    }

    pub fn cancel_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let mut intents = self.intents.lock().expect("intent map lock poisoned");
        let intent = intents
            .get_mut(intent_id)
            .ok_or_else(|| PaymentError::IntentNotFound(intent_id.to_string()))?;
        if intent.is_terminal() {
            return Err(PaymentError::IntentFinalized(intent_id.to_string()));
        }
        intent.status = PaymentIntentStatus::Canceled;
        info!("Payment intent {} canceled", intent_id);
        Ok(intent.clone())
    }

    /// Mock saved-card record; always the same test visa.
    pub async fn save_payment_method(
        &self,
        _customer_id: &str,
        method: &PaymentMethodDetails,
    ) -> Result<SavedPaymentMethod, PaymentError> {
        validate_method_shape(method)?;
        tokio::time::sleep(Duration::from_millis(self.latency_ms / 2)).await;

        Ok(SavedPaymentMethod {
            id: format!("pm_{}", random_token(9)),
            method_type: "card".to_string(),
            card_brand: "visa".to_string(),
            card_last4: "4242".to_string(),
            exp_month: 12,
            exp_year: 2025,
        })
    }
}

/// Presence and length only. No checksum: the gateway is simulated and never
/// inspects the digits.
fn validate_method_shape(method: &PaymentMethodDetails) -> Result<(), PaymentError> {
    if method.card_number.trim().is_empty() {
        return Err(PaymentError::InvalidCard("Card number is required".to_string()));
    }
    if method.card_number.len() > MAX_CARD_NUMBER_LEN {
        return Err(PaymentError::InvalidCard("Card number is too long".to_string()));
    }
    if method.cvc.trim().is_empty() {
        return Err(PaymentError::InvalidCard("CVC is required".to_string()));
    }
    if method.cvc.len() > MAX_CVC_LEN {
        return Err(PaymentError::InvalidCard("CVC is too long".to_string()));
    }
    if !(1..=12).contains(&method.exp_month) {
        return Err(PaymentError::InvalidCard("Expiry month is invalid".to_string()));
    }
    if !(2000..=2100).contains(&method.exp_year) {
        return Err(PaymentError::InvalidCard("Expiry year is invalid".to_string()));
    }
    Ok(())
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect()
}
