//! Raw vote validation and normalization
//!
//! Koios rows arrive with every field optional. Normalization enforces the
//! fields a report row cannot exist without and converts the submission
//! time into a real timestamp. Invalid rows are dropped individually with
//! an inspectable reason; one bad row never aborts the run.

use crate::models::vote::{DropReason, NormalizedVote, RawVote, VoteChoice};
use chrono::DateTime;

/// Suffix appended to the proposal tx hash when forming the display hash
/// used for report links. Explorer governance pages key on the tx hash
/// plus a two-character index; kept as an explicit named step so it can
/// be changed in one place.
pub const DISPLAY_HASH_SUFFIX: &str = "00";

/// Append `suffix` to a raw proposal tx hash to form the display hash
pub fn display_tx_hash(raw_hash: &str, suffix: &str) -> String {
    format!("{}{}", raw_hash, suffix)
}

/// Validate and reshape one raw vote row
pub fn normalize(raw: &RawVote) -> Result<NormalizedVote, DropReason> {
    let proposal_id = match &raw.proposal_id {
        Some(id) => id.clone(),
        None => return Err(DropReason::MissingProposalId),
    };

    let vote_value = match &raw.vote {
        Some(v) => v,
        None => return Err(DropReason::MissingVote),
    };
    let vote = VoteChoice::parse(vote_value)
        .ok_or_else(|| DropReason::UnknownVote(vote_value.clone()))?;

    let secs = raw.block_time.ok_or(DropReason::MissingBlockTime)?;
    let block_time = DateTime::from_timestamp(secs, 0).ok_or(DropReason::InvalidBlockTime(secs))?;

    Ok(NormalizedVote {
        proposal_id,
        proposal_tx_hash: raw
            .proposal_tx_hash
            .as_deref()
            .map(|h| display_tx_hash(h, DISPLAY_HASH_SUFFIX)),
        vote_tx_hash: raw.vote_tx_hash.clone(),
        block_time,
        vote,
        meta_url: raw.meta_url.clone(),
        meta_hash: raw.meta_hash.clone(),
    })
}

/// Normalize a batch lazily; callers decide what to do with drop reasons
pub fn normalize_all(
    raws: &[RawVote],
) -> impl Iterator<Item = Result<NormalizedVote, DropReason>> + '_ {
    raws.iter().map(normalize)
}
