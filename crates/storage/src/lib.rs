// storage/src/lib.rs

//! Durable artifact storage
//!
//! Every transaction intent returned by the execution service is written to
//! disk before anything downstream consumes it:
//! - `<action>.json` holds the raw result
//! - `<action>-tx.json` is the signed transaction produced by the signer
//!
//! Artifacts are never mutated or deleted once written; the target directory
//! is an audit trail of the run.

pub mod action;
pub mod artifacts;

pub use action::{ActionName, ActionSequence};
pub use artifacts::{ArtifactStore, RESULT_SUFFIX, SIGNED_TX_SUFFIX};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid action name: {0}")]
    InvalidActionName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}
