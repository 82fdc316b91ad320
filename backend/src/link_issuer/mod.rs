//! Signed download links for objects in S3
mod error;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use tracing::{debug, info};

pub use error::{IssuerError, IssuerResult};

use crate::types::AppConfig;

/// Capability to produce time-limited download links
#[async_trait]
pub trait LinkIssuer: Send + Sync {
    /// Generates a URL granting read access to `key` for `expiration`
    ///
    /// The caller is responsible for bounding `expiration`.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidKey` if `key` is empty
    /// Returns `IssuerError::SigningFailure` if the signer cannot produce a URL
    async fn generate_signed_url(&self, key: &str, expiration: Duration) -> IssuerResult<String>;
}

/// Link issuer backed by S3 presigned GET requests
pub struct S3LinkIssuer {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl std::fmt::Debug for S3LinkIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3LinkIssuer")
            .field("bucket_name", &self.bucket_name)
            .finish_non_exhaustive()
    }
}

fn require_bucket(bucket_name: Option<String>) -> IssuerResult<String> {
    bucket_name.filter(|name| !name.is_empty()).ok_or_else(|| {
        IssuerError::ConfigError("AWS_S3_BUCKET environment variable is required".to_string())
    })
}

impl S3LinkIssuer {
    /// Creates a new issuer for the given bucket
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket holding the linked objects
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::ConfigError` if the bucket name is absent or empty
    pub fn new(s3_client: Arc<S3Client>, bucket_name: Option<String>) -> IssuerResult<Self> {
        Ok(Self {
            s3_client,
            bucket_name: require_bucket(bucket_name)?,
        })
    }

    /// Builds an issuer from application configuration, loading the AWS SDK config
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::ConfigError` if no bucket is configured
    pub async fn from_config(config: &AppConfig) -> IssuerResult<Self> {
        // Checked before the credential chain is loaded
        let bucket_name = require_bucket(config.s3_bucket.clone())?;
        let s3_client = Arc::new(S3Client::from_conf(config.s3_client_config().await));

        info!("Initialized S3 link issuer for bucket: {}", bucket_name);

        Ok(Self {
            s3_client,
            bucket_name,
        })
    }
}

#[async_trait]
impl LinkIssuer for S3LinkIssuer {
    async fn generate_signed_url(&self, key: &str, expiration: Duration) -> IssuerResult<String> {
        if key.is_empty() {
            return Err(IssuerError::InvalidKey(key.to_string()));
        }

        debug!(
            "Generating signed URL for object: {} expiring in {:?}",
            key, expiration
        );

        let presigned_config = PresigningConfig::expires_in(expiration).map_err(|e| {
            IssuerError::SigningFailure(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigned_config)
            .await?;

        Ok(presigned_request.uri().to_string())
    }
}
