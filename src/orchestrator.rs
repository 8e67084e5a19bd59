//! Dump run orchestration
//!
//! A run moves strictly forward through
//! `Init → LoggedIn → ProbedCapabilities → BulkDownloaded → SpecialResolved
//! → ExtraResolved → Localized → Serialized → Done`.
//! Login and probe failures end the run in `Failed`; request failures in the
//! later stages are absorbed by the stage that hit them. Writing the output
//! can also fail the run, after which nothing has been emitted.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::client::ApiClient;
use crate::config::RunConfig;
use crate::dump::paths::{EXTRA_PATHS, LOCALIZED_PATHS, SKIP_PATHS};
use crate::dump::{
    download_extra, download_localized, probe_capabilities, resolve_special_paths,
    traverse_declared, Downloader, EndpointFilter, FeatureFlags, StageStats,
};
use crate::error::DumpResult;
use crate::openapi::ApiDocument;
use crate::snapshot::Snapshot;

/// Stage of a dump run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Init,
    LoggedIn,
    ProbedCapabilities,
    BulkDownloaded,
    SpecialResolved,
    ExtraResolved,
    Localized,
    Serialized,
    Done,
    Failed,
}

impl RunStage {
    /// The stage a successful step leads to
    pub fn next(self) -> Option<RunStage> {
        use RunStage::*;
        match self {
            Init => Some(LoggedIn),
            LoggedIn => Some(ProbedCapabilities),
            ProbedCapabilities => Some(BulkDownloaded),
            BulkDownloaded => Some(SpecialResolved),
            SpecialResolved => Some(ExtraResolved),
            ExtraResolved => Some(Localized),
            Localized => Some(Serialized),
            Serialized => Some(Done),
            Done | Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::Done | RunStage::Failed)
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Path lists used by a run
#[derive(Debug, Clone, Copy)]
pub struct PathLists {
    pub skip: &'static [&'static str],
    pub localized: &'static [&'static str],
    pub extra: &'static [&'static str],
}

impl Default for PathLists {
    fn default() -> Self {
        Self {
            skip: SKIP_PATHS,
            localized: LOCALIZED_PATHS,
            extra: EXTRA_PATHS,
        }
    }
}

/// Result of a completed run
#[derive(Debug)]
pub struct RunOutcome {
    pub snapshot: Snapshot,
    pub flags: FeatureFlags,
    pub summary: StageStats,
    pub warnings: Vec<String>,
}

/// Sequences the stages of one dump run
pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    client: &'a dyn ApiClient,
    documents: Vec<ApiDocument>,
    lists: PathLists,
    stage: RunStage,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a RunConfig,
        client: &'a dyn ApiClient,
        documents: Vec<ApiDocument>,
    ) -> Self {
        Self {
            config,
            client,
            documents,
            lists: PathLists::default(),
            stage: RunStage::Init,
        }
    }

    pub fn with_lists(mut self, lists: PathLists) -> Self {
        self.lists = lists;
        self
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Run all stages and emit the snapshot
    pub async fn run(&mut self) -> DumpResult<RunOutcome> {
        match self.run_stages().await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(stage = %self.stage, error = %e, "Dump failed");
                self.stage = RunStage::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> DumpResult<RunOutcome> {
        let token = self.client.login(&self.config.password).await?;
        self.advance();

        let downloader = Downloader::new(self.client, token);
        let mut snapshot = Snapshot::new();
        let mut summary = StageStats::default();

        let flags = probe_capabilities(&downloader, &mut snapshot).await?;
        self.advance();

        let filter = EndpointFilter::with_lists(self.lists.skip, self.lists.localized, flags);
        let stats = traverse_declared(&self.documents, &filter, &downloader, &mut snapshot).await;
        self.finish_stage(stats, &mut summary);

        let stats = resolve_special_paths(&downloader, &mut snapshot).await;
        self.finish_stage(stats, &mut summary);

        let stats = download_extra(self.lists.extra, &downloader, &mut snapshot).await;
        self.finish_stage(stats, &mut summary);

        let stats = download_localized(self.lists.localized, &downloader, &mut snapshot).await;
        self.finish_stage(stats, &mut summary);

        let text = snapshot.to_json_pretty()?;
        self.advance();

        self.config.output.emit(&text).await?;
        self.advance();

        info!(
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "Dump finished"
        );

        let warnings = snapshot.sanity_warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(RunOutcome {
            snapshot,
            flags,
            summary,
            warnings,
        })
    }

    fn finish_stage(&mut self, stats: StageStats, summary: &mut StageStats) {
        debug!(
            stage = ?self.stage.next(),
            downloaded = stats.downloaded,
            skipped = stats.skipped,
            failed = stats.failed,
            "Stage finished"
        );
        *summary += stats;
        self.advance();
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            debug!(from = %self.stage, to = %next, "Stage transition");
            self.stage = next;
        }
    }
}
