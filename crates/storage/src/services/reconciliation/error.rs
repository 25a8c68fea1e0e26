use thiserror::Error;

use crate::error::StorageError;

/// Failure of the external results provider for one match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("match {0} was not found")]
    NotFound(String),

    #[error("request for match {key} failed with status {status}")]
    Status { key: String, status: u16 },

    #[error("request for match {key} failed: {message}")]
    Transport { key: String, message: String },
}

/// Errors that abort a whole reconciliation run. Nothing is committed when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No reconciliation rules registered for season {0}")]
    UnsupportedSeason(i32),

    #[error("Failed to fetch match results: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
