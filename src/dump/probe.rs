//! Capability probing
//!
//! The zFCP and DASD flags gate which storage endpoints are valid to call,
//! so both probes must succeed before the bulk pass starts.

use serde_json::Value;
use tracing::info;

use crate::dump::fetch::Downloader;
use crate::dump::filter::FeatureFlags;
use crate::dump::paths::{DASD_SUPPORTED_PATH, ZFCP_SUPPORTED_PATH};
use crate::error::{DumpError, DumpResult};
use crate::snapshot::Snapshot;

/// Probe the hardware capabilities and record both raw responses
///
/// Any failure is fatal.
pub async fn probe_capabilities(
    downloader: &Downloader<'_>,
    snapshot: &mut Snapshot,
) -> DumpResult<FeatureFlags> {
    let zfcp_supported = probe(downloader, ZFCP_SUPPORTED_PATH, snapshot).await?;
    let dasd_supported = probe(downloader, DASD_SUPPORTED_PATH, snapshot).await?;

    let flags = FeatureFlags {
        zfcp_supported,
        dasd_supported,
    };
    info!(zfcp = zfcp_supported, dasd = dasd_supported, "Capabilities probed");
    Ok(flags)
}

async fn probe(
    downloader: &Downloader<'_>,
    path: &str,
    snapshot: &mut Snapshot,
) -> DumpResult<bool> {
    info!(path = %path, "Probing");
    let value = downloader
        .fetch(path)
        .await
        .map_err(|e| probe_error(path, e))?;

    let supported = match &value {
        Value::Bool(b) => *b,
        other => {
            return Err(probe_error(
                path,
                DumpError::InvalidResponse(format!("expected a boolean, got {}", other)),
            ))
        }
    };

    snapshot.record(path, value);
    Ok(supported)
}

fn probe_error(path: &str, source: DumpError) -> DumpError {
    DumpError::CapabilityProbe {
        path: path.to_string(),
        source: Box::new(source),
    }
}
