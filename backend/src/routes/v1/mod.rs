/// Image gallery placeholder
pub mod images;
/// Signed resume download links
pub mod resume;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> Router<AppState> {
    Router::new()
        .route("/resume", get(resume::get_signed_url))
        .route("/images", get(images::get_images))
}
