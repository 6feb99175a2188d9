//! Repository error types.

use thiserror::Error;

use super::repository::TournamentHandle;
use crate::tournament::TournamentError;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON (de)serialization of a stored state failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot encoding failed
    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Snapshot decoding failed
    #[error("Decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// No tournament stored under this handle
    #[error("Tournament not found: {0}")]
    NotFound(TournamentHandle),

    /// Stored tournament fails validation
    #[error(transparent)]
    Tournament(#[from] TournamentError),
}

impl RepositoryError {
    /// Message safe to show an operator without leaking SQL details.
    pub fn client_message(&self) -> String {
        match self {
            RepositoryError::Database(_) => "Internal storage error".to_string(),
            RepositoryError::Encode(_) | RepositoryError::Decode(_) => {
                "Stored tournament could not be read".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
