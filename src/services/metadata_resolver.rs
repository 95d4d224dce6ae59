//! Vote metadata resolver
//!
//! Votes may reference an externally hosted JSON metadata document by URL
//! (the anchor the DRep attached when casting the vote). The document is
//! untrusted and frequently missing, moved, or malformed, so every failure
//! degrades to "no metadata" instead of an error. One fetch per vote, no
//! retries.

use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("drep-history/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// External vote metadata document; only the rationale text is consulted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteMetadata {
    #[serde(default)]
    pub body: Option<MetadataBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataBody {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

impl VoteMetadata {
    /// Free-text rationale, checking the two key paths seen in the wild.
    /// Empty strings count as absent so a blank comment still falls back.
    pub fn rationale(&self) -> Option<&str> {
        let body = self.body.as_ref()?;
        body.comment
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(body.rationale.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Best-effort fetcher for external metadata documents
pub struct MetadataResolver {
    http_client: reqwest::Client,
}

impl MetadataResolver {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http_client })
    }

    /// Fetch and parse one metadata document; any failure yields None
    pub async fn fetch(&self, url: &str) -> Option<VoteMetadata> {
        match self.try_fetch(url).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::warn!(url = %url, "Error fetching metadata: {}", e);
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<VoteMetadata, reqwest::Error> {
        let response = self.http_client.get(url).send().await?;
        let response = response.error_for_status()?;
        response.json::<VoteMetadata>().await
    }
}
