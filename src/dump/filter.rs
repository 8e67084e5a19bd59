//! Endpoint filtering
//!
//! Decides, per path template, whether the bulk pass downloads it. Capability
//! and locale sensitivity cannot be read from the OpenAPI metadata, hence the
//! hard-coded lists in [`crate::dump::paths`].

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dump::paths::{LOCALIZED_PATHS, SKIP_PATHS};
use crate::openapi::EndpointSpec;

static ZFCP_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"/zfcp(/|$)").unwrap());
static DASD_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"/dasd(/|$)").unwrap());

/// Hardware capabilities probed at the start of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub zfcp_supported: bool,
    pub dasd_supported: bool,
}

/// Why a template is not downloaded in the bulk pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Listed,
    ZfcpUnsupported,
    DasdUnsupported,
    RequiresParameters,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Listed => "in skip list",
            SkipReason::ZfcpUnsupported => "zFCP not supported",
            SkipReason::DasdUnsupported => "DASD not supported",
            SkipReason::RequiresParameters => "requires parameters",
        };
        f.write_str(text)
    }
}

/// Outcome of filtering one template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Download,
    Skip(SkipReason),
    /// Handled later by the localized pass
    Defer,
}

/// Bulk-pass endpoint filter
#[derive(Debug, Clone)]
pub struct EndpointFilter {
    skip: HashSet<String>,
    localized: HashSet<String>,
    flags: FeatureFlags,
}

impl EndpointFilter {
    /// Filter using the built-in skip and localized lists
    pub fn new(flags: FeatureFlags) -> Self {
        Self::with_lists(SKIP_PATHS, LOCALIZED_PATHS, flags)
    }

    pub fn with_lists(skip: &[&str], localized: &[&str], flags: FeatureFlags) -> Self {
        Self {
            skip: skip.iter().map(|s| s.to_string()).collect(),
            localized: localized.iter().map(|s| s.to_string()).collect(),
            flags,
        }
    }

    /// Decide a bare path template; first matching rule wins
    pub fn decide(&self, template: &str) -> FilterDecision {
        if self.skip.contains(template) {
            return FilterDecision::Skip(SkipReason::Listed);
        }
        if self.localized.contains(template) {
            return FilterDecision::Defer;
        }
        if !self.flags.zfcp_supported && ZFCP_MARKER.is_match(template) {
            return FilterDecision::Skip(SkipReason::ZfcpUnsupported);
        }
        if !self.flags.dasd_supported && DASD_MARKER.is_match(template) {
            return FilterDecision::Skip(SkipReason::DasdUnsupported);
        }
        FilterDecision::Download
    }

    /// Decide a declared endpoint, also checking its parameters
    pub fn decide_endpoint(&self, endpoint: &EndpointSpec) -> FilterDecision {
        match self.decide(&endpoint.path_template) {
            FilterDecision::Download if endpoint.requires_parameters() => {
                FilterDecision::Skip(SkipReason::RequiresParameters)
            }
            decision => decision,
        }
    }

    pub fn should_skip(&self, template: &str) -> bool {
        self.decide(template) != FilterDecision::Download
    }
}
