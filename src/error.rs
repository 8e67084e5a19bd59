//! Error types for api-snapshot
//!
//! This module defines the error taxonomy used throughout the dump run.
//! Fatal errors (login, capability probes) unwind to the orchestrator;
//! every other request error is logged by the stage that produced it.

use thiserror::Error;

/// Dump-level errors
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Login failed: {0}")]
    Auth(String),

    #[error("Request to {path} failed with status {status}: {body}")]
    Request {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Capability probe {path} failed: {source}")]
    CapabilityProbe {
        path: String,
        #[source]
        source: Box<DumpError>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    /// Whether this error aborts the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, DumpError::Auth(_) | DumpError::CapabilityProbe { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            DumpError::Request { status, .. } => Some(*status),
            DumpError::Http(e) => e.status().map(|s| s.as_u16()),
            DumpError::CapabilityProbe { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type DumpResult<T> = Result<T, DumpError>;
