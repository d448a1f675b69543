use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, PaymentState};

pub fn payment_routes(state: Arc<PaymentState>) -> Router {
    Router::new()
        .route("/intents", post(handlers::create_payment_intent))
        .route("/intents/{intent_id}/confirm", post(handlers::confirm_payment))
        .route("/intents/{intent_id}/cancel", post(handlers::cancel_payment))
        .with_state(state)
}
