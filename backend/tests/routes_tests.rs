mod common;

use common::*;
use http::StatusCode;

const TEST_URL: &str = "https://test-bucket.s3.amazonaws.com/resume/Resume.pdf?signed-url";

#[tokio::test]
async fn test_images_placeholder() {
    let setup = TestSetup::healthy(TEST_URL);

    let response = setup
        .send_get_request("/api/v1/images")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_body(response).await.is_empty());
}

#[tokio::test]
async fn test_images_placeholder_in_degraded_mode() {
    let setup = TestSetup::degraded();

    let response = setup.send_get_request("/api/v1/images").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let setup = TestSetup::degraded();

    let response = setup.send_get_request("/health").await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_routes_require_api_prefix() {
    let setup = TestSetup::healthy(TEST_URL);

    for route in ["/resume", "/images", "/api/v2/resume", "/api/v1/unknown"] {
        let response = setup.send_get_request(route).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "Expected 404 for {route}"
        );
    }

    assert!(setup.issuer_calls().is_empty());
}

#[tokio::test]
async fn test_resume_rejects_other_methods() {
    let setup = TestSetup::healthy(TEST_URL);

    let request = axum::http::Request::builder()
        .uri("/api/v1/resume")
        .method("POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(setup.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(setup.issuer_calls().is_empty());
}
