//! Report block rendering
//!
//! Each vote renders as a fixed-shape markdown table. The shape never
//! varies with data completeness; absent fields render placeholder text so
//! every block has the same rows in the same order.

use crate::models::proposal::ProposalDetail;
use crate::models::vote::NormalizedVote;
use crate::services::metadata_resolver::VoteMetadata;

const UNKNOWN_PROPOSAL_TITLE: &str = "Unknown Proposal";
const UNKNOWN_PROPOSAL_TYPE: &str = "Unknown";
const NO_RATIONALE: &str = "No rationale available";
const NOT_AVAILABLE: &str = "N/A";
const GOVERNANCE_EXPLORER_URL: &str = "https://adastat.net/governances";
const TRANSACTION_EXPLORER_URL: &str = "https://adastat.net/transactions";

/// Collapse newline and whitespace runs and escape pipes so free text
/// cannot break out of its table cell
pub fn sanitize_rationale(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace('|', "\\|")
}

/// Render one vote as its report table block
pub fn render_block(
    organization_name: &str,
    vote: &NormalizedVote,
    proposal: Option<&ProposalDetail>,
    metadata: Option<&VoteMetadata>,
) -> String {
    // Koios sometimes serves empty strings where it means "no value";
    // treat those as absent so the placeholders still apply
    let title = proposal
        .and_then(|p| p.title.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_PROPOSAL_TITLE);
    let proposal_type = proposal
        .and_then(|p| p.proposal_type.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_PROPOSAL_TYPE);
    let proposed_epoch = proposal
        .and_then(|p| p.proposed_epoch)
        .map(|e| e.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let expiration_epoch = proposal
        .and_then(|p| p.expiration)
        .map(|e| e.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let display_hash = vote.proposal_tx_hash.as_deref().unwrap_or(NOT_AVAILABLE);
    let vote_tx_hash = vote.vote_tx_hash.as_deref().unwrap_or(NOT_AVAILABLE);
    let vote_text = format!("{}{}", vote.vote.glyph(), vote.vote.as_str());
    let submitted = vote.block_time.format("%Y-%m-%d").to_string();

    let rationale = metadata
        .and_then(|m| m.rationale())
        .map(sanitize_rationale)
        .unwrap_or_else(|| NO_RATIONALE.to_string());

    format!(
        "| {organization_name} | Cardano Governance Actions |\n\
         | -------------- | ------------------------------------------------------------------ |\n\
         | Proposal Title | [{title}]({GOVERNANCE_EXPLORER_URL}/{display_hash}) |\n\
         | Hash | {display_hash} |\n\
         | Action ID | {proposal_id} |\n\
         | Type | {proposal_type} |\n\
         | Proposed Epoch | {proposed_epoch} |\n\
         | Expires Epoch | {expiration_epoch} |\n\
         | Vote | {vote_text} |\n\
         | Vote Submitted | {submitted} |\n\
         | Rationale | {rationale} |\n\
         | Link | {TRANSACTION_EXPLORER_URL}/{vote_tx_hash} |",
        proposal_id = vote.proposal_id,
    )
}
