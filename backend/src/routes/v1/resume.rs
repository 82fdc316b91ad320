use axum::{
    extract::{RawQuery, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{expiration::resolve_expiration, state::AppState, types::AppError};

/// Object served by this endpoint. Never derived from request input.
pub const RESUME_OBJECT_KEY: &str = "resume/Resume.pdf";

/// Query parameter carrying the requested validity window, e.g. `30m` or `2h`
const EXPIRES_IN_PARAM: &str = "expires_in";

/// Successful signed link response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    /// Presigned GET URL for the resume
    pub url: String,
    /// RFC 3339 UTC timestamp when the URL expires
    pub expires_at: String,
}

/// Issues a time-limited download link for the resume
///
/// The optional `expires_in` query parameter is honoured when it parses and lies in
/// `(0, 24h]`; otherwise the link is valid for 15 minutes. When the parameter is
/// repeated, the first occurrence wins.
///
/// # Errors
///
/// - `503` when the link issuer failed to initialize
/// - `500` when signing fails; the cause is only logged
#[instrument(skip(app_state, query))]
pub async fn get_signed_url(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let Some(link_issuer) = app_state.link_issuer else {
        return Err(AppError::unavailable());
    };

    let expires_in = query.as_deref().and_then(first_expires_in);
    let expiration = resolve_expiration(expires_in.as_deref());

    let url = link_issuer
        .generate_signed_url(RESUME_OBJECT_KEY, expiration)
        .await?;

    let expires_at = (Utc::now() + expiration).to_rfc3339_opts(SecondsFormat::Secs, true);

    tracing::info!("Issued signed URL for {RESUME_OBJECT_KEY} expiring at {expires_at}");

    Ok(Json(SignedUrlResponse { url, expires_at }))
}

/// First `expires_in` value in a raw query string; other pairs are ignored
fn first_expires_in(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == EXPIRES_IN_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_expires_in() {
        assert_eq!(first_expires_in("expires_in=30m").as_deref(), Some("30m"));
        assert_eq!(
            first_expires_in("expires_in=30m&expires_in=2h").as_deref(),
            Some("30m")
        );
        assert_eq!(
            first_expires_in("key=a%ZZ&expires_in=1h%2030m").as_deref(),
            Some("1h 30m")
        );
        assert_eq!(first_expires_in("expires_in=").as_deref(), Some(""));
        assert_eq!(first_expires_in("other=1"), None);
        assert_eq!(first_expires_in(""), None);
    }
}
