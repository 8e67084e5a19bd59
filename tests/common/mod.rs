//! Common test utilities for api-snapshot
//!
//! Shared fixtures and helpers used across the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{json, Map, Value};

use api_snapshot::openapi::parse_document;
use api_snapshot::{ApiDocument, AuthToken, HttpApiClient, OutputSink, RunConfig};

/// Test configuration constants
pub mod constants {
    /// Password accepted by the mock installer
    pub const TEST_PASSWORD: &str = "nots3cr3t";
    /// Token handed out by the mock installer
    pub const TEST_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjE3MDAwMDAwMDB9.test";
}

/// Run configuration pointing at a mock installer
pub fn test_config(base_url: &str, output: OutputSink) -> RunConfig {
    RunConfig {
        base_url: base_url.to_string(),
        password: constants::TEST_PASSWORD.to_string(),
        openapi_dir: PathBuf::from("openapi"),
        output,
        debug: false,
    }
}

/// Client for a mock installer
pub fn http_client(base_url: &str) -> HttpApiClient {
    HttpApiClient::with_base_url(reqwest::Client::new(), base_url)
}

/// The token the mock installer accepts
pub fn test_token() -> AuthToken {
    AuthToken::new(constants::TEST_TOKEN)
}

/// Document declaring a parameterless GET for each template
pub fn get_document(name: &str, templates: &[&str]) -> ApiDocument {
    let paths: Map<String, Value> = templates
        .iter()
        .map(|t| (t.to_string(), json!({ "get": { "responses": {} } })))
        .collect();
    parse_document(name, &json!({ "openapi": "3.0.3", "paths": paths })).unwrap()
}

/// Document parsed from a full OpenAPI value
pub fn document(name: &str, value: Value) -> ApiDocument {
    parse_document(name, &value).unwrap()
}
