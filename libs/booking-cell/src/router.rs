use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, BookingState};

pub fn booking_routes(state: Arc<BookingState>, config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/drafts", post(handlers::start_draft))
        .route("/drafts/{draft_id}", get(handlers::get_draft))
        .route("/drafts/{draft_id}", patch(handlers::update_draft))
        .route("/drafts/{draft_id}", delete(handlers::abandon_draft))
        .route("/drafts/{draft_id}/advance", post(handlers::advance_draft))
        .route("/drafts/{draft_id}/retreat", post(handlers::retreat_draft))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
