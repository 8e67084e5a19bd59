//! Parameterized endpoints
//!
//! Some endpoints can only be called with identifiers taken from an earlier
//! response. These run after the bulk pass has recorded their parents.

use serde_json::Value;
use tracing::{debug, info};

use crate::dump::fetch::{Downloader, StageStats};
use crate::dump::paths::{NETWORK_CONNECTIONS_PATH, PRODUCT_PARAMS_PATH, VOLUME_FOR_PATH};
use crate::snapshot::Snapshot;

/// Non-empty `id` values of a network connections response
///
/// Anything that is not an array of objects yields nothing.
pub fn extract_connection_ids(connections: Option<&Value>) -> Vec<String> {
    connections
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("id").and_then(Value::as_str))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// String entries of `mountPoints` in a storage product params response
///
/// `None` when the list is absent or not an array.
pub fn extract_mount_points(params: Option<&Value>) -> Option<Vec<String>> {
    params
        .and_then(|p| p.get("mountPoints"))
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
}

/// Request key for the default volume of `mount_path`
pub fn volume_for_path(mount_path: &str) -> String {
    format!("{}?mount_path={}", VOLUME_FOR_PATH, urlencoding::encode(mount_path))
}

/// Request keys the resolver would issue for the current snapshot, in order
pub fn special_paths(snapshot: &Snapshot) -> Vec<String> {
    let mut paths: Vec<String> = extract_connection_ids(snapshot.get(NETWORK_CONNECTIONS_PATH))
        .iter()
        .map(|id| format!("{}/{}", NETWORK_CONNECTIONS_PATH, id))
        .collect();

    if let Some(mount_points) = extract_mount_points(snapshot.get(PRODUCT_PARAMS_PATH)) {
        paths.extend(mount_points.iter().map(|m| volume_for_path(m)));
        // the web client also asks for the empty mount point
        paths.push(volume_for_path(""));
    }

    paths
}

/// Download the parameterized endpoints derived from the snapshot
///
/// Must run after the bulk pass.
pub async fn resolve_special_paths(
    downloader: &Downloader<'_>,
    snapshot: &mut Snapshot,
) -> StageStats {
    let mut stats = StageStats::default();
    let paths = special_paths(snapshot);
    if paths.is_empty() {
        debug!("No parameterized endpoints to resolve");
        return stats;
    }

    info!(count = paths.len(), "Resolving parameterized endpoints");
    for path in &paths {
        downloader.download(path, snapshot, &mut stats).await;
    }
    stats
}
