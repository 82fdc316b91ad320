mod health;
/// Version 1 API handlers
pub mod v1;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Prefix the versioned API is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Creates the router with all handler routes
pub fn handler() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handler))
        .nest(API_PREFIX, v1::handler())
}
