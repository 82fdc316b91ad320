//! Application state management

use std::sync::Arc;

use crate::link_issuer::LinkIssuer;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// Link issuer, `None` when it failed to initialize at startup
    pub link_issuer: Option<Arc<dyn LinkIssuer>>,
}

impl AppState {
    /// State with a working link issuer
    #[must_use]
    pub fn new(link_issuer: Arc<dyn LinkIssuer>) -> Self {
        Self {
            link_issuer: Some(link_issuer),
        }
    }

    /// State without a link issuer; signed link requests report unavailability
    #[must_use]
    pub fn degraded() -> Self {
        Self { link_issuer: None }
    }
}
