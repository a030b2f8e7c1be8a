//! Client error types.

use eventboard_providers::FetchError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
    /// Fetching upcoming events failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The fetch did not finish within the configured deadline.
    #[error("timeout: {0}")]
    Timeout(String),
    /// Action failed (opening a link).
    #[error("action failed: {0}")]
    Action(String),
}

impl ClientError {
    /// Returns true for errors that should end the process with a failure
    /// code instead of falling back to the empty state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Io(_) | Self::Action(_))
    }
}
