use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    link_issuer::{IssuerError, IssuerResult, LinkIssuer},
    server,
    state::AppState,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Setup test environment variables and logging
pub fn setup_test_env() {
    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Link issuer substitute that records every call
pub struct MockLinkIssuer {
    outcome: Result<String, String>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl MockLinkIssuer {
    pub fn returning(url: &str) -> Self {
        Self {
            outcome: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkIssuer for MockLinkIssuer {
    async fn generate_signed_url(&self, key: &str, expiration: Duration) -> IssuerResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), expiration));

        self.outcome
            .clone()
            .map_err(IssuerError::SigningFailure)
    }
}

/// Router wired to a link issuer, or to none in degraded mode
pub struct TestSetup {
    pub router: Router,
    pub link_issuer: Option<Arc<MockLinkIssuer>>,
}

impl TestSetup {
    pub fn with_issuer(link_issuer: MockLinkIssuer) -> Self {
        setup_test_env();

        let link_issuer = Arc::new(link_issuer);
        let router = server::router(AppState::new(link_issuer.clone()));

        Self {
            router,
            link_issuer: Some(link_issuer),
        }
    }

    pub fn healthy(url: &str) -> Self {
        Self::with_issuer(MockLinkIssuer::returning(url))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_issuer(MockLinkIssuer::failing(message))
    }

    pub fn degraded() -> Self {
        setup_test_env();

        Self {
            router: server::router(AppState::degraded()),
            link_issuer: None,
        }
    }

    pub fn issuer_calls(&self) -> Vec<(String, Duration)> {
        self.link_issuer
            .as_ref()
            .map(|issuer| issuer.calls())
            .unwrap_or_default()
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        send_get_request(&self.router, route).await
    }
}

pub async fn send_get_request(
    router: &Router,
    route: &str,
) -> Result<Response, Box<dyn std::error::Error>> {
    let request = Request::builder()
        .uri(route)
        .method("GET")
        .body(Body::empty())?;
    let response = router.clone().oneshot(request).await?;
    Ok(response)
}

/// Content-Type header of a response, if any
pub fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// Raw response body
pub async fn read_body(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    parse_response(response).await
}

/// Parse response body into a typed payload
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> T {
    serde_json::from_slice(&read_body(response).await).unwrap()
}
