use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, ProviderState};

/// Directory endpoints are public; browsing providers requires no session.
pub fn provider_routes(state: Arc<ProviderState>) -> Router {
    Router::new()
        .route("/", get(handlers::search_providers))
        .route("/{provider_id}", get(handlers::get_provider))
        .route("/{provider_id}/slots", get(handlers::get_provider_slots))
        .with_state(state)
}
