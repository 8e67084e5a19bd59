//! Bulk traversal of declared endpoints and the extra-paths pass

use std::collections::HashSet;

use tracing::{debug, info};

use crate::dump::fetch::{Downloader, StageStats};
use crate::dump::filter::{EndpointFilter, FilterDecision};
use crate::openapi::ApiDocument;
use crate::snapshot::Snapshot;

/// Download every declared GET endpoint the filter lets through
///
/// Documents are visited in order, endpoints in declaration order. A template
/// declared by several documents is considered once. Request failures are
/// logged and counted, never propagated.
pub async fn traverse_declared(
    documents: &[ApiDocument],
    filter: &EndpointFilter,
    downloader: &Downloader<'_>,
    snapshot: &mut Snapshot,
) -> StageStats {
    let mut stats = StageStats::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for document in documents {
        debug!(document = %document.name, "Traversing document");

        for endpoint in document.endpoints.iter().filter(|e| e.has_get) {
            let template = endpoint.path_template.as_str();
            if !seen.insert(template) {
                debug!(path = %template, document = %document.name, "Already considered");
                continue;
            }

            match filter.decide_endpoint(endpoint) {
                FilterDecision::Download => {
                    downloader.download(template, snapshot, &mut stats).await;
                }
                FilterDecision::Defer => {
                    info!(path = %template, "Skipping, downloaded per language later");
                    stats.skipped += 1;
                }
                FilterDecision::Skip(reason) => {
                    info!(path = %template, reason = %reason, "Skipping");
                    stats.skipped += 1;
                }
            }
        }
    }

    stats
}

/// Download endpoints that exist on the server but not in the documents
pub async fn download_extra(
    extra: &[&str],
    downloader: &Downloader<'_>,
    snapshot: &mut Snapshot,
) -> StageStats {
    let mut stats = StageStats::default();
    for path in extra {
        downloader.download(path, snapshot, &mut stats).await;
    }
    stats
}
