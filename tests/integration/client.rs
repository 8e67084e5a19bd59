//! HTTP client integration tests
//!
//! Tests for the reqwest-backed client against the mock installer:
//! - POST /api/auth - Login
//! - GET - JSON, non-JSON, malformed and failing responses
//! - PATCH - Locale switch

use serde_json::json;

use api_snapshot::client::Fetched;
use api_snapshot::{ApiClient, DumpError};

use crate::common::{constants, http_client, test_token};
use crate::mocks::MockInstallerServer;

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockInstallerServer::start().await;
    server.mock_login_success().await;

    let client = http_client(&server.uri());
    let token = client.login(constants::TEST_PASSWORD).await.unwrap();

    assert_eq!(token.as_str(), constants::TEST_TOKEN);
}

#[tokio::test]
async fn test_login_unauthorized_is_auth_error() {
    let server = MockInstallerServer::start().await;
    server.mock_login_failure(401).await;

    let client = http_client(&server.uri());
    let err = client.login("wrong").await.unwrap_err();

    assert!(matches!(err, DumpError::Auth(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_get_sends_bearer_token() {
    let server = MockInstallerServer::start().await;
    server
        .mock_get_json("/api/network/state", json!({ "wirelessEnabled": true }))
        .await;

    let client = http_client(&server.uri());
    let fetched = client.get("/api/network/state", &test_token()).await.unwrap();

    assert_eq!(fetched, Fetched::Json(json!({ "wirelessEnabled": true })));

    let requests = server.received_requests().await;
    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(auth, format!("Bearer {}", constants::TEST_TOKEN));
}

#[tokio::test]
async fn test_get_non_json_body() {
    let server = MockInstallerServer::start().await;
    server.mock_get_text("/api/manager/logs/list", "y2log\nzypper.log").await;

    let client = http_client(&server.uri());
    let fetched = client.get("/api/manager/logs/list", &test_token()).await.unwrap();

    match fetched {
        Fetched::NotJson { content_type } => assert!(content_type.starts_with("text/plain")),
        other => panic!("expected a non-JSON response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_failure_status() {
    let server = MockInstallerServer::start().await;
    server.mock_get_status("/api/storage/devices/system", 500).await;

    let client = http_client(&server.uri());
    let err = client
        .get("/api/storage/devices/system", &test_token())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_get_malformed_json() {
    let server = MockInstallerServer::start().await;
    server.mock_get_malformed_json("/api/software/config").await;

    let client = http_client(&server.uri());
    let err = client.get("/api/software/config", &test_token()).await.unwrap_err();

    assert!(matches!(err, DumpError::Json(_)));
}

#[tokio::test]
async fn test_patch_success_and_failure() {
    let server = MockInstallerServer::start().await;
    server.mock_locale_switch_failure("xx_XX.UTF-8").await;
    server.mock_locale_switch().await;

    let client = http_client(&server.uri());
    client
        .patch("/api/l10n/config", &json!({ "uiLocale": "de_DE.UTF-8" }), &test_token())
        .await
        .unwrap();

    let err = client
        .patch("/api/l10n/config", &json!({ "uiLocale": "xx_XX.UTF-8" }), &test_token())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}
