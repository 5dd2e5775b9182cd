//! Storage error types

use thiserror::Error;

/// Failures reported by a [`crate::WidthStore`] or while decoding its contents.
///
/// None of these ever reach the caller of the controller: the persistence adapter logs
/// them and keeps working from memory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be reached (disabled, private mode, detached, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write because it is full.
    #[error("storage quota exceeded for key `{key}`")]
    QuotaExceeded { key: String },

    /// The stored value is not a JSON object of numbers.
    #[error("corrupt width map: {0}")]
    Corrupt(#[from] serde_json::Error),
}
