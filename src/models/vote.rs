//! Vote records: raw Koios rows, the validated vote enum, normalized votes

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Raw vote row as returned by the Koios drep_votes endpoint
///
/// Every field is optional so that validation happens per record rather
/// than at deserialization time; incomplete rows are dropped individually
/// without aborting the run.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVote {
    pub proposal_id: Option<String>,
    pub proposal_tx_hash: Option<String>,
    pub proposal_index: Option<i64>,
    pub vote_tx_hash: Option<String>,
    /// Vote submission time, UNIX seconds
    pub block_time: Option<i64>,
    pub vote: Option<String>,
    pub meta_url: Option<String>,
    pub meta_hash: Option<String>,
}

/// The three vote values Cardano governance recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    /// Parse a raw vote string; anything outside the enum is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            "Abstain" => Some(Self::Abstain),
            _ => None,
        }
    }

    /// Glyph rendered next to the vote text
    ///
    /// Anything that is not an explicit Yes or No gets the neutral glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Yes => "✅",
            Self::No => "❌",
            _ => "⚪",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Abstain => "Abstain",
        }
    }
}

/// Why a raw vote row was dropped instead of normalized
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DropReason {
    #[error("missing required field: proposal_id")]
    MissingProposalId,

    #[error("missing required field: vote")]
    MissingVote,

    #[error("missing required field: block_time")]
    MissingBlockTime,

    #[error("block_time {0} is not a representable timestamp")]
    InvalidBlockTime(i64),

    #[error("invalid vote value: {0}. Must be one of: Yes, No, Abstain")]
    UnknownVote(String),
}

/// A validated vote ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVote {
    pub proposal_id: String,
    /// Proposal tx hash with the display suffix already applied
    pub proposal_tx_hash: Option<String>,
    pub vote_tx_hash: Option<String>,
    pub block_time: DateTime<Utc>,
    pub vote: VoteChoice,
    pub meta_url: Option<String>,
    pub meta_hash: Option<String>,
}

impl NormalizedVote {
    /// ISO-8601 submission timestamp
    pub fn block_time_iso(&self) -> String {
        self.block_time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Calendar year (UTC) the vote was submitted in
    pub fn year(&self) -> i32 {
        self.block_time.year()
    }
}

/// A normalized vote paired with its pre-rendered report block
#[derive(Debug, Clone)]
pub struct RenderedVote {
    pub vote: NormalizedVote,
    pub table: String,
}
