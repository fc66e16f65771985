//! Error types for persistence.

use thiserror::Error;

/// Result type for persistence operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while reading or writing the narrative document.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The storage backend failed to read or write.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend refused the write because it is full.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Size of the rejected write.
        needed: usize,
        /// Backend capacity.
        limit: usize,
    },

    /// No storage location could be determined.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
