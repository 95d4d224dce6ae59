//! Configuration loading and validation
//!
//! The reporter reads a small JSON config file (the DRep identity and the
//! organization name shown in report headers) plus the Koios API key from
//! the environment. All three values are required; anything missing or
//! empty fails the run before any network traffic happens.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the Koios bearer token
pub const API_KEY_ENV: &str = "KOIOS_API_KEY";

/// On-disk config file shape (camelCase keys)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    drep_id: Option<String>,
    organization_name: Option<String>,
}

/// Resolved runtime configuration, passed explicitly into the pipeline
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Bech32 DRep identifier whose votes are reported
    pub drep_id: String,
    /// Organization name rendered into each report block header
    pub organization_name: String,
    /// Koios API bearer token
    pub api_key: String,
}

impl ReportConfig {
    /// Load and validate configuration from `path` and the environment
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let file: ConfigFile = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;

        let drep_id = require(file.drep_id, "drepId", path)?;
        let organization_name = require(file.organization_name, "organizationName", path)?;
        let api_key = api_key_from_env()?;

        Ok(Self {
            drep_id,
            organization_name,
            api_key,
        })
    }
}

/// Read the Koios API key from the environment
pub fn api_key_from_env() -> Result<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(Error::Config(format!(
            "{} environment variable is not set",
            API_KEY_ENV
        ))),
    }
}

fn require(value: Option<String>, field: &str, path: &Path) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "{} not found in {}",
            field,
            path.display()
        ))),
    }
}
