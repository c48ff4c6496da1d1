//! Canonical serialization and content-hash primitives for neurite documents.
//!
//! Every byte that participates in hashing — document payloads, ledger event
//! payloads, DID documents — goes through this crate. The canonical profile
//! sorts object members lexicographically at every nesting level and emits no
//! insignificant whitespace, so semantically equal documents always hash to
//! the same digest, across processes and restarts.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Content-hash digest primitives.
pub mod content_hash;
/// Identifier newtypes shared across the workspace.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use content_hash::{hash_value, ContentHash};
pub use identifiers::{Did, SchemaId, Timestamp};
pub use validation::ValidationError;
