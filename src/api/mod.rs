pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        .route("/", get(handlers::root::root))
        .nest("/api", api_routes())
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::root::health_check))
        .nest("/users", user_routes())
        .nest("/parking-spaces", space_routes())
        .nest("/sessions", session_routes())
        .nest("/payments", payment_routes())
        .nest("/reviews", review_routes())
        .nest("/analytics", analytics_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::users::register))
        .route("/:id", get(handlers::users::get))
        .route("/:user_id/sessions", get(handlers::sessions::list_by_user))
}

fn space_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::spaces::create))
        .route("/", get(handlers::spaces::list))
        .route("/:id", get(handlers::spaces::get))
        .route("/:id", put(handlers::spaces::update))
        .route("/:id/reviews", get(handlers::reviews::list_for_space))
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(handlers::sessions::check_in))
        .route("/check-out", post(handlers::sessions::check_out))
        .route("/:id", get(handlers::sessions::get))
        .route("/:id/qr", get(handlers::sessions::qr_image))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::payments::create))
        .route("/:id", get(handlers::payments::get))
}

fn review_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::reviews::create))
}

fn analytics_routes() -> Router<AppState> {
    Router::new().route("/owner/:email", get(handlers::analytics::owner_summary))
}
