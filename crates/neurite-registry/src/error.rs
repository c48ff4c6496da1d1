//! Error types for registry operations.

use neurite_canonical::Did;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The DID has never been registered.
    #[error("DID {did} not found")]
    NotFound {
        /// The DID that was looked up.
        did: Did,
    },
    /// The backend could not complete a durable read or write. State is left
    /// unchanged; the core never retries.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    /// Canonicalization of a DID document failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] neurite_canonical::CanonicalizationError),
    /// A persisted record could not be decoded.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// A persisted record carried a malformed identifier or timestamp.
    #[error("corrupt record: {0}")]
    CorruptRecord(#[from] neurite_canonical::ValidationError),
}
