//! api-snapshot - Snapshot of an installer's REST API
//!
//! This library discovers the GET endpoints of a running installer from its
//! OpenAPI documents, downloads them in a fixed sequential order, and
//! aggregates the responses into one JSON document.

pub mod client;
pub mod config;
pub mod dump;
pub mod error;
pub mod openapi;
pub mod orchestrator;
pub mod snapshot;

pub use crate::client::{ApiClient, AuthToken, HttpApiClient};
pub use crate::config::{Args, RunConfig};
pub use crate::error::{DumpError, DumpResult};
pub use crate::openapi::{load_spec_dir, ApiDocument, EndpointSpec, ParameterSpec};
pub use crate::orchestrator::{Orchestrator, PathLists, RunOutcome, RunStage};
pub use crate::snapshot::{OutputSink, Snapshot};
