use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{routes, state::AppState, types::AppConfig};

/// Builds the application router with its state and middleware
pub fn router(app_state: AppState) -> Router {
    routes::handler()
        .with_state(app_state)
        // Open a tracing span per request
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given configuration and state
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(config: &AppConfig, app_state: AppState) -> anyhow::Result<()> {
    let router = router(app_state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Portfolio Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
