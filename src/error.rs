//! Common error types for the voting history reporter

use thiserror::Error;

/// Common result type for reporter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a report run
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Koios API failure on a fetch that cannot be degraded
    #[error("Koios API error: {0}")]
    Koios(#[from] crate::services::koios_client::KoiosError),
}
