//! Decentralized-identity registry.
//!
//! Stores DID documents, their signature sets, and an append-only list of
//! attestations per DID, and resolves a DID to its full current state.
//! Signatures and attestations are informational: they are stored exactly as
//! supplied and never cryptographically verified here.
//!
//! The registry duplicates the dual-backend pattern of the store crate with
//! its own [`RegistryBackend`] contract: durable (SQLite) and volatile
//! (in-process) variants with identical observable semantics, selected once
//! at startup.

#![deny(missing_docs)]

/// Registry backend contract and startup-time mode selection.
pub mod backend;
/// Error types for registry operations.
pub mod error;
/// Volatile in-process backend.
pub mod memory;
/// The registry facade.
pub mod registry;
/// Durable SQLite backend.
pub mod sqlite;
/// Record types held by the registry.
pub mod types;

mod clock;

pub use backend::{open_registry_backend, RegistryBackend, RegistryMode};
pub use error::RegistryError;
pub use memory::MemoryRegistryBackend;
pub use registry::IdentityRegistry;
pub use sqlite::SqliteRegistryBackend;
pub use types::{Attestation, ResolvedDid, SignatureEntry};
