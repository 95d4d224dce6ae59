//! Proposal records from the Koios voter_proposal_list endpoint

use serde::Deserialize;
use std::collections::HashMap;

/// Raw proposal record as returned by Koios
///
/// Only the fields the report consumes are mapped; everything else in the
/// record is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposalRecord {
    pub proposal_id: Option<String>,
    pub proposal_type: Option<String>,
    pub proposed_epoch: Option<i64>,
    pub expiration: Option<i64>,
    pub meta_json: Option<ProposalMetaJson>,
}

/// Anchor metadata document embedded in a proposal record
#[derive(Debug, Clone, Deserialize)]
pub struct ProposalMetaJson {
    pub body: Option<ProposalMetaBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalMetaBody {
    pub title: Option<String>,
}

/// Proposal details retained for report rendering
#[derive(Debug, Clone)]
pub struct ProposalDetail {
    pub title: Option<String>,
    pub proposal_type: Option<String>,
    pub proposed_epoch: Option<i64>,
    pub expiration: Option<i64>,
}

impl From<ProposalRecord> for ProposalDetail {
    fn from(record: ProposalRecord) -> Self {
        let title = record.meta_json.and_then(|m| m.body).and_then(|b| b.title);
        Self {
            title,
            proposal_type: record.proposal_type,
            proposed_epoch: record.proposed_epoch,
            expiration: record.expiration,
        }
    }
}

/// Read-only mapping from proposal id to proposal detail, built once per run
#[derive(Debug, Default)]
pub struct ProposalIndex {
    entries: HashMap<String, ProposalDetail>,
}

impl ProposalIndex {
    /// Index with no entries; every lookup falls back to placeholders
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from raw records, skipping any without a proposal id
    pub fn from_records(records: Vec<ProposalRecord>) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            let id = match record.proposal_id.clone() {
                Some(id) => id,
                None => {
                    tracing::warn!("Found proposal without proposal_id, skipping");
                    continue;
                }
            };
            entries.insert(id, ProposalDetail::from(record));
        }
        Self { entries }
    }

    pub fn get(&self, proposal_id: &str) -> Option<&ProposalDetail> {
        self.entries.get(proposal_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
