//! drep-history library interface
//!
//! Fetches a DRep's on-chain governance votes from the Koios API, joins
//! them with proposal details and externally hosted rationale documents,
//! and renders year-partitioned markdown voting-history reports.
//!
//! Exposed as a library so integration tests can drive the pipeline
//! against a local mock of the upstream API.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{Error, Result};
