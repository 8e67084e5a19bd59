//! Single-request primitives shared by all stages

use std::ops::AddAssign;

use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ApiClient, AuthToken, Fetched};
use crate::error::DumpResult;
use crate::snapshot::Snapshot;

/// Request counters for one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl AddAssign for StageStats {
    fn add_assign(&mut self, other: Self) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Remove trailing slashes; `/` itself is kept
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Authenticated downloader bound to one client and token
pub struct Downloader<'a> {
    client: &'a dyn ApiClient,
    token: AuthToken,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a dyn ApiClient, token: AuthToken) -> Self {
        Self { client, token }
    }

    /// GET `path` and return the value to record
    ///
    /// Non-JSON bodies become `null` with a warning.
    pub async fn fetch(&self, path: &str) -> DumpResult<Value> {
        match self.client.get(path, &self.token).await? {
            Fetched::NotJson { content_type } => {
                warn!(
                    path = %path,
                    content_type = %content_type,
                    "Response is not JSON, recording null"
                );
                Ok(Value::Null)
            }
            fetched => Ok(fetched.into_record()),
        }
    }

    /// Download `path` into the top level of the snapshot
    ///
    /// Failures are logged and leave the key absent. Returns whether the
    /// response was recorded.
    pub async fn download(
        &self,
        path: &str,
        snapshot: &mut Snapshot,
        stats: &mut StageStats,
    ) -> bool {
        let key = trim_trailing_slash(path);
        info!(path = %key, "Downloading");
        match self.fetch(key).await {
            Ok(value) => {
                snapshot.record(key, value);
                stats.downloaded += 1;
                true
            }
            Err(e) => {
                warn!(path = %key, status = ?e.status(), error = %e, "Download failed");
                stats.failed += 1;
                false
            }
        }
    }

    /// Download `path` into the partition of `language`
    pub async fn download_localized(
        &self,
        language: &str,
        path: &str,
        snapshot: &mut Snapshot,
        stats: &mut StageStats,
    ) -> bool {
        let key = trim_trailing_slash(path);
        info!(path = %key, language = %language, "Downloading localized");
        match self.fetch(key).await {
            Ok(value) => {
                snapshot.record_localized(language, key, value);
                stats.downloaded += 1;
                true
            }
            Err(e) => {
                warn!(
                    path = %key,
                    language = %language,
                    status = ?e.status(),
                    error = %e,
                    "Localized download failed"
                );
                stats.failed += 1;
                false
            }
        }
    }

    /// Authenticated PATCH
    pub async fn patch(&self, path: &str, body: &Value) -> DumpResult<()> {
        self.client.patch(path, body, &self.token).await
    }
}
