//! Report generation pipeline
//!
//! Strictly linear flow: build the proposal index, fetch the vote list,
//! then per vote resolve metadata, normalize, and render; finally write
//! the year-partitioned reports. The two upstream fetches carry different
//! failure policies, named below.

use crate::config::ReportConfig;
use crate::models::proposal::ProposalIndex;
use crate::models::vote::{RawVote, RenderedVote};
use crate::services::koios_client::KoiosClient;
use crate::services::metadata_resolver::MetadataResolver;
use crate::services::{normalizer, renderer, report_writer};
use crate::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// Error-handling policy attached to an upstream fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Failure logs and yields an empty result; the run continues degraded
    FailOpen,
    /// Failure propagates and the process exits non-zero
    FailClosed,
}

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub proposals_indexed: usize,
    pub votes_fetched: usize,
    pub votes_dropped: usize,
    pub files_written: usize,
}

/// Build the proposal index for the voter
///
/// Policy: `FailOpen`. A missing index only degrades the report (titles
/// and epochs fall back to placeholders), so no failure here aborts the
/// run.
pub async fn build_proposal_index(client: &KoiosClient, voter_id: &str) -> ProposalIndex {
    match client.voter_proposal_list(voter_id).await {
        Ok(records) => {
            info!("Found {} proposals in voter_proposal_list", records.len());
            let index = ProposalIndex::from_records(records);
            info!("Successfully mapped {} proposals", index.len());
            index
        }
        Err(e) => {
            error!(policy = ?FetchPolicy::FailOpen, "Error fetching proposal details: {}", e);
            ProposalIndex::empty()
        }
    }
}

/// Fetch the raw vote list for the DRep
///
/// Policy: `FailClosed`. Without votes there is nothing to report, so any
/// failure is fatal to the run.
pub async fn fetch_votes(client: &KoiosClient, drep_id: &str) -> Result<Vec<RawVote>> {
    match client.drep_votes(drep_id).await {
        Ok(votes) => {
            info!("Fetched {} votes for DRep {}", votes.len(), drep_id);
            Ok(votes)
        }
        Err(e) => {
            error!(policy = ?FetchPolicy::FailClosed, "Error fetching DRep votes: {}", e);
            Err(e.into())
        }
    }
}

/// Run the full report pipeline and write yearly reports under `output_dir`
pub async fn run(
    config: &ReportConfig,
    client: &KoiosClient,
    resolver: &MetadataResolver,
    output_dir: &Path,
) -> Result<RunSummary> {
    let index = build_proposal_index(client, &config.drep_id).await;
    let raw_votes = fetch_votes(client, &config.drep_id).await?;

    let mut summary = RunSummary {
        proposals_indexed: index.len(),
        votes_fetched: raw_votes.len(),
        ..Default::default()
    };

    let mut rendered = Vec::with_capacity(raw_votes.len());
    for result in normalizer::normalize_all(&raw_votes) {
        let vote = match result {
            Ok(vote) => vote,
            Err(reason) => {
                warn!("Invalid vote data: {}", reason);
                summary.votes_dropped += 1;
                continue;
            }
        };

        // Metadata fetches run strictly one at a time, in vote order
        let metadata = match &vote.meta_url {
            Some(url) => resolver.fetch(url).await,
            None => None,
        };

        let table = renderer::render_block(
            &config.organization_name,
            &vote,
            index.get(&vote.proposal_id),
            metadata.as_ref(),
        );
        rendered.push(RenderedVote { vote, table });
    }

    let written = report_writer::write_reports(output_dir, rendered)?;
    summary.files_written = written.len();

    info!("All votes processed and organized by year successfully");
    Ok(summary)
}
