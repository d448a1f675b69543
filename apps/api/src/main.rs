use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use auth_cell::handlers::AuthState;
use auth_cell::services::session::AuthSessionService;
use auth_cell::services::theme::ThemeService;
use booking_cell::handlers::BookingState;
use booking_cell::services::wizard::BookingWizardService;
use chat_cell::handlers::ChatState;
use chat_cell::services::session::ChatSessionService;
use notification_cell::handlers::NotificationState;
use notification_cell::services::notifier::NotificationService;
use payment_cell::handlers::PaymentState;
use payment_cell::services::gateway::PaymentGatewayService;
use provider_cell::handlers::ProviderState;
use provider_cell::services::directory::ProviderDirectory;
use screening_cell::handlers::ScreeningState;
use screening_cell::services::screening::{Questionnaire, ScreeningService};
use shared_config::AppConfig;
use shared_storage::ClientStore;
use shared_utils::clock::SystemClock;

use crate::router::ApiState;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WEvolve API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());
    let client = ClientStore::open(&config.storage_dir)
        .expect("storage directory must be creatable and writable");
    let clock = Arc::new(SystemClock);

    // Wire up the cells
    let directory = Arc::new(ProviderDirectory::new());
    let gateway = Arc::new(PaymentGatewayService::new(&config));
    let notifier = Arc::new(NotificationService::new(&config));
    let wizard = Arc::new(BookingWizardService::new(
        directory.clone(),
        gateway.clone(),
        notifier.clone(),
        clock.clone(),
    ));

    let state = ApiState {
        config: config.clone(),
        auth: Arc::new(AuthState {
            session: Arc::new(AuthSessionService::new(&config, client.clone())),
            theme: Arc::new(ThemeService::new(client)),
        }),
        providers: Arc::new(ProviderState { directory, clock }),
        bookings: Arc::new(BookingState { wizard }),
        screenings: Arc::new(ScreeningState {
            screening: Arc::new(ScreeningService::new(Questionnaire::standard())),
        }),
        payments: Arc::new(PaymentState { gateway }),
        chat: Arc::new(ChatState {
            session: Arc::new(ChatSessionService::new(&config)),
        }),
        notifications: Arc::new(NotificationState { notifier }),
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
