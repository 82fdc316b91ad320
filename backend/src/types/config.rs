//! Process-wide configuration, read once at startup

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use tracing::Level;

use super::Environment;

const DEFAULT_PORT: u16 = 8080;

/// Configuration values shared by the server and the link issuer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment stage
    pub environment: Environment,
    /// Bucket holding the linked objects, `None` when unset or empty
    pub s3_bucket: Option<String>,
    /// Optional S3 endpoint override (e.g. `LocalStack`)
    pub s3_endpoint_url: Option<String>,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Default log level when `RUST_LOG` is unset
    pub tracing_level: Level,
}

impl AppConfig {
    /// Reads the configuration from environment variables
    ///
    /// A missing bucket is not an error here; it is reported when the link issuer is built.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();

        let port = env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.trim().parse())?;

        let tracing_level = env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or_else(|| environment.default_tracing_level());

        Ok(Self {
            environment,
            s3_bucket: non_empty_var("AWS_S3_BUCKET"),
            s3_endpoint_url: non_empty_var("AWS_S3_ENDPOINT_URL"),
            port,
            tracing_level,
        })
    }

    /// AWS configuration with retries disabled and an operation timeout
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = &self.s3_endpoint_url {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Custom endpoints such as LocalStack don't resolve virtual-hosted buckets
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if self.s3_endpoint_url.is_some() {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
