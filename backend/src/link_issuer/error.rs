//! Error types for signed link issuance

use aws_sdk_s3::{error::SdkError, operation::get_object::GetObjectError};
use thiserror::Error;

/// Result type for link issuer operations
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Errors that can occur while building an issuer or signing a link
#[derive(Error, Debug)]
pub enum IssuerError {
    /// Required configuration is missing or invalid
    #[error("{0}")]
    ConfigError(String),

    /// The object key is empty
    #[error("Invalid object key: {0:?}")]
    InvalidKey(String),

    /// The signer could not produce a URL
    #[error("Failed to generate signed URL: {0}")]
    SigningFailure(String),
}

impl From<SdkError<GetObjectError>> for IssuerError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        Self::SigningFailure(format!("{error:?}"))
    }
}
