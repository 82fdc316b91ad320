use std::sync::Arc;

use backend::{link_issuer::S3LinkIssuer, server, state::AppState, types::AppConfig};
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before anything reads the environment
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = AppConfig::from_env()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.tracing_level).into())
        .from_env_lossy();

    // JSON logs for staging/production, regular format for development
    if config.environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    if !dotenv_loaded {
        info!("No .env file found, using system environment variables");
    }

    info!("Starting Portfolio Backend in {:?} environment", config.environment);

    let app_state = match S3LinkIssuer::from_config(&config).await {
        Ok(link_issuer) => AppState::new(Arc::new(link_issuer)),
        Err(e) => {
            warn!("Failed to initialize S3 service: {e}");
            AppState::degraded()
        }
    };

    server::start(&config, app_state).await
}
