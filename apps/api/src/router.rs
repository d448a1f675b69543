use std::sync::Arc;

use axum::{routing::get, Router};

use auth_cell::handlers::AuthState;
use auth_cell::router::auth_routes;
use booking_cell::handlers::BookingState;
use booking_cell::router::booking_routes;
use chat_cell::handlers::ChatState;
use chat_cell::router::chat_routes;
use notification_cell::handlers::NotificationState;
use notification_cell::router::notification_routes;
use payment_cell::handlers::PaymentState;
use payment_cell::router::payment_routes;
use provider_cell::handlers::ProviderState;
use provider_cell::router::provider_routes;
use screening_cell::handlers::ScreeningState;
use screening_cell::router::screening_routes;
use shared_config::AppConfig;

pub struct ApiState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthState>,
    pub providers: Arc<ProviderState>,
    pub bookings: Arc<BookingState>,
    pub screenings: Arc<ScreeningState>,
    pub payments: Arc<PaymentState>,
    pub chat: Arc<ChatState>,
    pub notifications: Arc<NotificationState>,
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(|| async { "WEvolve API is running!" }))
        .nest("/auth", auth_routes(state.auth, state.config.clone()))
        .nest("/providers", provider_routes(state.providers))
        .nest("/bookings", booking_routes(state.bookings, state.config))
        .nest("/screenings", screening_routes(state.screenings))
        .nest("/payments", payment_routes(state.payments))
        .nest("/chat", chat_routes(state.chat))
        .nest("/notifications", notification_routes(state.notifications))
}
