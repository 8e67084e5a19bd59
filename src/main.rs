//! api-snapshot - Snapshot of an installer's REST API
//!
//! This is the command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use api_snapshot::{load_spec_dir, Args, HttpApiClient, Orchestrator, RunConfig};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let debug = args.debug;

    if let Err(err) = run(args).await {
        if debug {
            eprintln!("error: {:?}", err);
        } else {
            eprintln!("error: {}", err);
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = RunConfig::from_args(args)?;

    // Initialize tracing; stdout is reserved for the snapshot
    let default_filter = if config.debug {
        "api_snapshot=debug"
    } else {
        "api_snapshot=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!(api = %config.base_url, "Starting API snapshot");

    let documents = load_spec_dir(&config.openapi_dir)
        .await
        .context("loading OpenAPI documents")?;

    let http_client = HttpApiClient::build_http_client().context("building HTTP client")?;
    let client = HttpApiClient::new(http_client, &config);

    let mut orchestrator = Orchestrator::new(&config, &client, documents);
    orchestrator
        .run()
        .await
        .with_context(|| format!("dumping {}", config.base_url))?;

    Ok(())
}
