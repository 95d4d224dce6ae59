//! drep-history - DRep voting history report generator
//!
//! Pulls a DRep's governance votes from the Koios API, joins them with
//! proposal details and vote rationale documents, and writes one markdown
//! report per calendar year under the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use drep_history::config::ReportConfig;
use drep_history::services::koios_client::KoiosClient;
use drep_history::services::metadata_resolver::MetadataResolver;
use drep_history::services::pipeline;

/// Command-line arguments for drep-history
#[derive(Parser, Debug)]
#[command(name = "drep-history")]
#[command(about = "DRep voting history report generator")]
#[command(version)]
struct Args {
    /// Path to the JSON config file holding drepId and organizationName
    #[arg(short, long, default_value = "config.json", env = "DREP_HISTORY_CONFIG")]
    config: PathBuf,

    /// Directory the yearly reports are written under
    #[arg(short, long, default_value = "voting-history", env = "DREP_HISTORY_OUTPUT")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else can log
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting drep-history v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = ReportConfig::load(&args.config).context("Failed to load configuration")?;
    info!("Reporting voting history for DRep {}", config.drep_id);
    info!("Output directory: {}", args.output.display());

    let client =
        KoiosClient::new(config.api_key.clone()).context("Failed to create Koios client")?;
    let resolver = MetadataResolver::new().context("Failed to create metadata resolver")?;

    let summary = pipeline::run(&config, &client, &resolver, &args.output)
        .await
        .context("Report generation failed")?;

    info!(
        "Done: {} proposals indexed, {} votes fetched, {} dropped, {} yearly files written",
        summary.proposals_indexed, summary.votes_fetched, summary.votes_dropped, summary.files_written
    );

    Ok(())
}
