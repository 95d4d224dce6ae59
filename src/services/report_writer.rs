//! Year-partitioned report output
//!
//! One markdown file per calendar year under the output directory,
//! newest vote first, fully overwritten on every run.

use crate::models::vote::RenderedVote;
use crate::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Group rendered votes by submission year (UTC)
pub fn partition_by_year(votes: Vec<RenderedVote>) -> BTreeMap<i32, Vec<RenderedVote>> {
    let mut by_year: BTreeMap<i32, Vec<RenderedVote>> = BTreeMap::new();
    for vote in votes {
        by_year.entry(vote.vote.year()).or_default().push(vote);
    }
    by_year
}

/// Concatenate one year's blocks under the year header
///
/// `votes` must already be sorted newest first.
fn render_year_document(year: i32, votes: &[RenderedVote]) -> String {
    let mut content = format!("# DRep Voting History for {}\n\n", year);
    for (i, vote) in votes.iter().enumerate() {
        if i > 0 {
            content.push_str(BLOCK_SEPARATOR);
        }
        content.push_str(&vote.table);
        content.push('\n');
    }
    content
}

/// Write one report file per year under `output_dir`; returns the paths
/// written. Existing files of the same name are overwritten in full.
pub fn write_reports(output_dir: &Path, votes: Vec<RenderedVote>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (year, mut year_votes) in partition_by_year(votes) {
        // Newest first; sort_by is stable, so equal timestamps keep fetch order
        year_votes.sort_by(|a, b| b.vote.block_time.cmp(&a.vote.block_time));

        let document = render_year_document(year, &year_votes);

        let year_dir = output_dir.join(year.to_string());
        fs::create_dir_all(&year_dir)?;
        let path = year_dir.join(format!("{}-votes.md", year));
        fs::write(&path, document)?;

        tracing::info!("Generated yearly markdown file: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
