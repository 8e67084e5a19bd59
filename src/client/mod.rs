//! Installer API client module
//!
//! Provides the HTTP capability the dump run is built on.

pub mod client;
pub mod models;

pub use client::{ApiClient, HttpApiClient};
pub use models::*;
