//! Storage error types.

use thiserror::Error;

/// Errors that can occur when talking to a storage port.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying medium could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Filesystem failure in a file-backed port.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key contains characters the port cannot store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
