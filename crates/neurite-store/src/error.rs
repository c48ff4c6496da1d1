//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document exists under the requested id.
    #[error("document {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },
    /// The backend could not complete a durable read or write. State is left
    /// unchanged; the core never retries.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    /// Canonicalization of a payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] neurite_canonical::CanonicalizationError),
    /// A persisted payload could not be decoded.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// A persisted record carried a malformed digest or timestamp.
    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] neurite_canonical::ValidationError),
}
