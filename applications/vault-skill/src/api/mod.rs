/// API route modules
pub mod health;
pub mod skill;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the HTTP router
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/skill", post(skill::handle_request));

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
