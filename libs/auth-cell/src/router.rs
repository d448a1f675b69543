use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, AuthState};

pub fn auth_routes(state: Arc<AuthState>, config: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register));

    let protected_routes = Router::new()
        .route("/logout", post(handlers::logout))
        .route("/profile", get(handlers::get_profile))
        .route("/profile", patch(handlers::update_profile))
        .route("/validate", get(handlers::validate_session))
        .route("/settings/theme", get(handlers::get_theme))
        .route("/settings/theme", put(handlers::set_theme))
        .route("/settings/theme/toggle", post(handlers::toggle_theme))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
