//! Installer API data models
//!
//! Wire structures for the few requests whose shape the dump run knows about.
//! Everything else is kept as untyped JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bearer token returned by the login call
///
/// Obtained once per run and never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the secret out of debug logs
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} chars>)", self.0.len())
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of the locale-switch PATCH
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfigPatch {
    pub ui_locale: String,
}

/// Outcome of a successful GET
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Body declared and parsed as JSON
    Json(Value),
    /// Body with a non-JSON content type; recorded as `null`
    NotJson { content_type: String },
}

impl Fetched {
    /// The value stored in the snapshot for this response
    pub fn into_record(self) -> Value {
        match self {
            Fetched::Json(value) => value,
            Fetched::NotJson { .. } => Value::Null,
        }
    }
}
