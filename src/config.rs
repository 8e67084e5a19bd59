//! Configuration management for api-snapshot
//!
//! Configuration comes from command-line arguments, falling back to
//! environment variables (optionally loaded from a `.env` file).

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::snapshot::OutputSink;

/// Default installer URL when neither `--api` nor `API_SNAPSHOT_URL` is given
pub const DEFAULT_API_URL: &str = "http://localhost";

/// Default directory holding the OpenAPI documents
pub const DEFAULT_OPENAPI_DIR: &str = "openapi";

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "api-snapshot")]
#[command(about = "Dump the GET endpoints of a running installer API into one JSON document")]
pub struct Args {
    /// Installer base URL (e.g. https://192.168.122.10)
    #[arg(short, long)]
    pub api: Option<String>,

    /// Login password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Directory with the OpenAPI JSON documents
    #[arg(short = 's', long)]
    pub openapi: Option<PathBuf>,

    /// Output file; the snapshot goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose logging and full error cause chains
    #[arg(short, long)]
    pub debug: bool,
}

/// Fully resolved configuration for one dump run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Installer base URL, without trailing slash
    pub base_url: String,
    /// Login password
    pub password: String,
    /// Directory with the OpenAPI JSON documents
    pub openapi_dir: PathBuf,
    /// Where the serialized snapshot goes
    pub output: OutputSink,
    /// Enable debug diagnostics
    pub debug: bool,
}

impl RunConfig {
    /// Resolve the configuration from arguments and the process environment
    pub fn from_args(args: Args) -> Result<Self> {
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Resolve the configuration using `lookup` for environment fallbacks
    pub fn resolve<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = args
            .api
            .or_else(|| lookup("API_SNAPSHOT_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let password = args
            .password
            .or_else(|| lookup("API_SNAPSHOT_PASSWORD"))
            .context("a password must be given with --password or API_SNAPSHOT_PASSWORD")?;

        let openapi_dir = args
            .openapi
            .or_else(|| lookup("API_SNAPSHOT_OPENAPI_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OPENAPI_DIR));

        let output = match args
            .output
            .or_else(|| lookup("API_SNAPSHOT_OUTPUT").map(PathBuf::from))
        {
            Some(path) => OutputSink::File(path),
            None => OutputSink::Stdout,
        };

        let debug = args.debug
            || lookup("API_SNAPSHOT_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);

        Ok(Self {
            base_url,
            password,
            openapi_dir,
            output,
            debug,
        })
    }
}
