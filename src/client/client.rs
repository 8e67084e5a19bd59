//! Installer API client
//!
//! HTTP client for the installer REST API. Certificate validation is
//! disabled because installers run with self-signed certificates.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::{
    client::models::{AuthToken, Fetched, LoginRequest, LoginResponse},
    config::RunConfig,
    error::{DumpError, DumpResult},
};

/// Path of the login endpoint
pub const AUTH_PATH: &str = "/api/auth";

/// Trait defining the HTTP capability the dump run depends on
///
/// Paths are given relative to the installer base URL and may carry a
/// query string. Implementations must not retry.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Log in with the given password and return the bearer token
    async fn login(&self, password: &str) -> DumpResult<AuthToken>;

    /// Authenticated GET
    async fn get(&self, path: &str, token: &AuthToken) -> DumpResult<Fetched>;

    /// Authenticated PATCH with a JSON body; any 2xx is success
    async fn patch(&self, path: &str, body: &Value, token: &AuthToken) -> DumpResult<()>;
}

/// reqwest-backed installer API client
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Create a new client for the configured installer
    pub fn new(client: reqwest::Client, config: &RunConfig) -> Self {
        Self::with_base_url(client, config.base_url.clone())
    }

    /// Create a new client for an explicit base URL
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the underlying reqwest client
    ///
    /// No timeout is set: a hung request blocks the run.
    pub fn build_http_client() -> DumpResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip(self, password))]
    async fn login(&self, password: &str) -> DumpResult<AuthToken> {
        let url = self.url(AUTH_PATH);
        debug!(url = %url, "Logging in");

        let request = LoginRequest {
            password: password.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        debug!(status = %status, "Login response status");

        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Login request failed");
            return Err(DumpError::Auth(format!("status {}: {}", status, text)));
        }

        let body = response.text().await?;
        let result: LoginResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "Failed to parse login response");
                return Err(DumpError::Auth(format!(
                    "failed to parse login response: {}",
                    e
                )));
            }
        };

        debug!("Logged in");
        Ok(AuthToken::new(result.token))
    }

    #[instrument(skip(self, token))]
    async fn get(&self, path: &str, token: &AuthToken) -> DumpResult<Fetched> {
        let url = self.url(path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "GET response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DumpError::Request {
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_json_content_type(&content_type) {
            warn!(content_type = %content_type, "Response is not JSON");
            return Ok(Fetched::NotJson { content_type });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(Fetched::Json(value))
    }

    #[instrument(skip(self, body, token))]
    async fn patch(&self, path: &str, body: &Value, token: &AuthToken) -> DumpResult<()> {
        let url = self.url(path);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(token.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "PATCH response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DumpError::Request {
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(())
    }
}

/// `application/json`, optionally with parameters such as a charset
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
