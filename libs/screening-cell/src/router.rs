use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, ScreeningState};

pub fn screening_routes(state: Arc<ScreeningState>) -> Router {
    Router::new()
        .route("/", post(handlers::start_screening))
        .route("/submit", post(handlers::submit_screening_one_shot))
        .route("/{session_id}/answers", post(handlers::record_answer))
        .route("/{session_id}/submit", post(handlers::submit_screening))
        .with_state(state)
}
