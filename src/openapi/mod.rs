//! OpenAPI document loading
//!
//! Turns a directory of OpenAPI JSON documents into endpoint lists.

pub mod loader;
pub mod models;

pub use loader::{load_spec_dir, parse_document};
pub use models::*;
