//! Integration tests for the health endpoint.

mod helpers;

use helpers::{ConverterMode, TestApp};
use http::StatusCode;

#[tokio::test]
async fn test_health_is_ok() {
    let app = TestApp::new(ConverterMode::Succeed).await;

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "polygen-midi");
    assert!(response.body["version"].is_string());
    assert!(response.body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new(ConverterMode::Succeed).await;

    let response = app.request("GET", "/jobs", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
