//! API route definitions
//!
//! - /health - liveness probe
//! - /api/projects - catalog listing
//! - /api/chat - catalog-grounded chat

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, AppState};

/// Routes mounted under /api
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/projects", get(handlers::get_projects))
        .route("/chat", post(handlers::post_chat))
        .with_state(state)
}

/// Root-level liveness route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(handlers::get_health))
}
