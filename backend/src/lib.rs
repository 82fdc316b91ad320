//! Portfolio Backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Expiration window parsing
pub mod expiration;

/// Signed download links
pub mod link_issuer;

/// Handler modules
pub mod routes;

/// HTTP server bootstrap
pub mod server;

/// Application state
pub mod state;

/// Configuration and error types
pub mod types;
