use std::sync::Arc;

use assert_matches::assert_matches;

use payment_cell::models::{PaymentError, PaymentIntentStatus, PaymentMethodDetails};
use payment_cell::services::gateway::{FixedOutcome, PaymentGatewayService};
use shared_config::AppConfig;

fn test_gateway(outcome: f64) -> PaymentGatewayService {
    let config = AppConfig::for_tests("unused");
    PaymentGatewayService::with_outcomes(&config, Arc::new(FixedOutcome(outcome)))
}

fn test_card() -> PaymentMethodDetails {
    PaymentMethodDetails {
        card_number: "4242424242424242".to_string(),
        cvc: "123".to_string(),
        exp_month: 12,
        exp_year: 2030,
        cardholder_name: Some("Sarah Johnson".to_string()),
    }
}

#[test]
fn create_intent_rejects_non_positive_amounts() {
    let gateway = test_gateway(0.0);
    assert_matches!(gateway.create_intent(0, "usd"), Err(PaymentError::InvalidAmount));
    assert_matches!(gateway.create_intent(-50, "usd"), Err(PaymentError::InvalidAmount));
}

#[test]
fn create_intent_starts_requiring_a_payment_method() {
    let gateway = test_gateway(0.0);
    let intent = gateway.create_intent(150, "usd").unwrap();

    assert_eq!(intent.status, PaymentIntentStatus::RequiresPaymentMethod);
    assert_eq!(intent.amount, 15000); // cents
    assert_eq!(intent.currency, "usd");
    assert!(intent.id.starts_with("pi_"));
    assert!(intent.client_secret.contains("_secret_"));
}

#[tokio::test]
async fn forced_success_always_succeeds() {
    // Draw of 0.0 is below any positive success rate.
    let gateway = test_gateway(0.0);
    let intent = gateway.create_intent(150, "usd").unwrap();

    let outcome = gateway.confirm(&intent.id, &test_card()).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.error, None);
    assert_eq!(
        gateway.get_intent(&intent.id).unwrap().status,
        PaymentIntentStatus::Succeeded
    );
}

#[tokio::test]
async fn forced_decline_always_declines_and_stays_retryable() {
    // Draw of 1.0 is never below the success rate.
    let gateway = test_gateway(1.0);
    let intent = gateway.create_intent(150, "usd").unwrap();

    let outcome = gateway.confirm(&intent.id, &test_card()).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Payment failed. Please try again."));

    // The intent is untouched, so the caller may retry.
    assert_eq!(
        gateway.get_intent(&intent.id).unwrap().status,
        PaymentIntentStatus::RequiresPaymentMethod
    );
}

#[tokio::test]
async fn succeeded_intent_is_never_mutated_again() {
    let gateway = test_gateway(0.0);
    let intent = gateway.create_intent(150, "usd").unwrap();
    gateway.confirm(&intent.id, &test_card()).await.unwrap();

    let err = gateway.confirm(&intent.id, &test_card()).await.unwrap_err();
    assert_matches!(err, PaymentError::IntentFinalized(_));

    let err = gateway.cancel_intent(&intent.id).unwrap_err();
    assert_matches!(err, PaymentError::IntentFinalized(_));
}

#[tokio::test]
async fn canceled_intent_cannot_be_confirmed() {
    let gateway = test_gateway(0.0);
    let intent = gateway.create_intent(150, "usd").unwrap();
    gateway.cancel_intent(&intent.id).unwrap();

    let err = gateway.confirm(&intent.id, &test_card()).await.unwrap_err();
    assert_matches!(err, PaymentError::IntentFinalized(_));
}

#[tokio::test]
async fn card_shape_is_checked_but_not_checksummed() {
    let gateway = test_gateway(0.0);
    let intent = gateway.create_intent(150, "usd").unwrap();

    // Not a valid Luhn number, still accepted: shape only.
    let mut card = test_card();
    card.card_number = "1111111111111111".to_string();
    assert!(gateway.confirm(&intent.id, &card).await.unwrap().success);

    let intent = gateway.create_intent(150, "usd").unwrap();
    let mut empty = test_card();
    empty.card_number = "".to_string();
    assert_matches!(
        gateway.confirm(&intent.id, &empty).await,
        Err(PaymentError::InvalidCard(_))
    );

    let mut too_long = test_card();
    too_long.card_number = "4".repeat(25);
    assert_matches!(
        gateway.confirm(&intent.id, &too_long).await,
        Err(PaymentError::InvalidCard(_))
    );
}

#[tokio::test]
async fn unknown_intent_is_not_found() {
    let gateway = test_gateway(0.0);
    let err = gateway.confirm("pi_missing", &test_card()).await.unwrap_err();
    assert_matches!(err, PaymentError::IntentNotFound(_));
}

#[tokio::test]
async fn save_payment_method_returns_mock_visa() {
    let gateway = test_gateway(0.0);
    let saved = gateway
        .save_payment_method("customer-1", &test_card())
        .await
        .unwrap();
    assert_eq!(saved.card_brand, "visa");
    assert_eq!(saved.card_last4, "4242");
    assert!(saved.id.starts_with("pm_"));
}
