use thiserror::Error;

use crate::state::data::ProjectId;

/// Failures of the persistent store.
/// These never reach the user: the repository logs them and keeps going.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored projects are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("project not found: {id}")]
    NotFound { id: ProjectId },
}

/// Failures while loading a photo picked by the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("not a supported image")]
    NotAnImage,
}
