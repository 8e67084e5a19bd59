//! Endpoint discovery and traversal
//!
//! The stages of a dump run: capability probing, the bulk pass over declared
//! endpoints, parameterized and extra endpoints, and the localized pass.

pub mod fetch;
pub mod filter;
pub mod localized;
pub mod paths;
pub mod probe;
pub mod special;
pub mod traversal;

pub use fetch::{trim_trailing_slash, Downloader, StageStats};
pub use filter::{EndpointFilter, FeatureFlags, FilterDecision, SkipReason};
pub use localized::{download_localized, locale_for_tag};
pub use probe::probe_capabilities;
pub use special::{extract_connection_ids, extract_mount_points, resolve_special_paths};
pub use traversal::{download_extra, traverse_declared};
