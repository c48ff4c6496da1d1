//! Storage for classified documents and the tamper-evident audit ledger.
//!
//! This crate provides:
//! - A [`StorageBackend`] contract with durable (SQLite) and volatile
//!   (in-process) implementations selected once at startup
//! - The append-only, content-addressed [`DocumentStore`]
//! - The hash-chained [`AuditLedger`] with an atomic linked-append and a
//!   full-chain [`AuditLedger::verify`] replay
//! - The [`IngestService`] pipeline tying classification, validation, and
//!   storage together
//!
//! Both backend variants observe identical semantics; the ledger's
//! read-head-then-insert step is a single atomic unit in each.

#![deny(missing_docs)]

/// Storage backend contract and startup-time mode selection.
pub mod backend;
/// Document store over a storage backend.
pub mod documents;
/// Error types for store operations.
pub mod error;
/// Classification + validation + storage pipeline.
pub mod ingest;
/// Hash-chained audit ledger.
pub mod ledger;
/// Volatile in-process backend.
pub mod memory;
/// Durable SQLite backend.
pub mod sqlite;

mod clock;

pub use backend::{open_backend, StorageBackend, StorageMode};
pub use documents::{DocumentReceipt, DocumentStore, StoredDocument};
pub use error::StoreError;
pub use ingest::{IngestError, IngestService};
pub use ledger::{AppendReceipt, AuditLedger, ChainVerdict, LedgerEntry};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
