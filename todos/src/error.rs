//! Error types for the task list.

use thiserror::Error;

/// Why the seed fetch failed
///
/// This is the only failure in the task list. The item store turns any of
/// these into [`LOAD_ERROR_MESSAGE`](crate::types::LOAD_ERROR_MESSAGE) and
/// keeps the detail for the logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedFetchError {
    /// Transport failure (DNS, TLS, connection reset, ...)
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status
    #[error("Unexpected status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not the expected todo collection
    #[error("Response parsing failed: {0}")]
    Parse(String),
}

/// Filter mode string that is none of `all`, `active`, `completed`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown filter mode '{0}' (expected all, active or completed)")]
pub struct ParseFilterModeError(pub String);
