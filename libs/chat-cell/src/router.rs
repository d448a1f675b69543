use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, ChatState};

pub fn chat_routes(state: Arc<ChatState>) -> Router {
    Router::new()
        .route("/messages", post(handlers::send_message))
        .route("/transcript", get(handlers::get_transcript))
        .route("/clear", post(handlers::clear_transcript))
        .with_state(state)
}
