//! Koios API client
//!
//! Bearer-authenticated client for the two Koios governance endpoints the
//! reporter consumes: voter_proposal_list and drep_votes. Both endpoints
//! return a JSON array; any other shape is reported as a distinct error so
//! callers can apply their own failure policy.

use crate::models::proposal::ProposalRecord;
use crate::models::vote::RawVote;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const KOIOS_BASE_URL: &str = "https://api.koios.rest/api/v1";
const USER_AGENT: &str = concat!("drep-history/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Koios client errors
#[derive(Debug, Error)]
pub enum KoiosError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Invalid response format: expected an array")]
    NotAnArray,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Koios API client
pub struct KoiosClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KoiosClient {
    pub fn new(api_key: String) -> Result<Self, KoiosError> {
        Self::with_base_url(api_key, KOIOS_BASE_URL)
    }

    /// Construct against a non-default base URL (local mock servers in tests)
    pub fn with_base_url(
        api_key: String,
        base_url: impl Into<String>,
    ) -> Result<Self, KoiosError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| KoiosError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// All governance proposals the voter has seen, one record per proposal
    pub async fn voter_proposal_list(
        &self,
        voter_id: &str,
    ) -> Result<Vec<ProposalRecord>, KoiosError> {
        let url = format!(
            "{}/voter_proposal_list?_voter_id={}",
            self.base_url, voter_id
        );
        self.get_array(&url).await
    }

    /// The DRep's full vote list, one record per vote cast
    pub async fn drep_votes(&self, drep_id: &str) -> Result<Vec<RawVote>, KoiosError> {
        let url = format!("{}/drep_votes?_drep_id={}", self.base_url, drep_id);
        self.get_array(&url).await
    }

    /// GET a bearer-authenticated endpoint that must return a JSON array
    async fn get_array<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, KoiosError> {
        tracing::debug!(url = %url, "Querying Koios API");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| KoiosError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(KoiosError::Api(status.as_u16(), error_text));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| KoiosError::Parse(e.to_string()))?;

        if !body.is_array() {
            return Err(KoiosError::NotAnArray);
        }

        serde_json::from_value(body).map_err(|e| KoiosError::Parse(e.to_string()))
    }
}
