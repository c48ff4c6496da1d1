//! Storage backend contract and startup-time mode selection.

use std::path::PathBuf;
use std::sync::Arc;

use neurite_canonical::{ContentHash, SchemaId, Timestamp};
use serde_json::Value;

use crate::documents::StoredDocument;
use crate::error::StoreError;
use crate::ledger::LedgerEntry;
use crate::memory::MemoryBackend;
use crate::sqlite::SqliteBackend;

/// Backend contract shared by the durable and volatile variants.
///
/// The backend owns all persisted bytes. Implementations must keep both
/// record sets append-only and must make [`append_entry`] atomic: the read
/// of the current head and the insert of the new entry happen as one unit,
/// so two concurrent appends can never record the same `prev_hash`.
///
/// [`append_entry`]: StorageBackend::append_entry
pub trait StorageBackend: Send + Sync {
    /// Appends a document row and returns its store-assigned id.
    ///
    /// Ids are monotonically increasing and never reused.
    fn insert_document(
        &self,
        schema_id: &SchemaId,
        content_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<u64, StoreError>;

    /// Fetches a document row by id; `None` when absent.
    fn fetch_document(&self, id: u64) -> Result<Option<StoredDocument>, StoreError>;

    /// Atomically links and appends a ledger entry, returning the
    /// `event_hash` of the entry that was the head at insert time (`None`
    /// for the first entry).
    fn append_entry(
        &self,
        event_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<Option<ContentHash>, StoreError>;

    /// Returns every ledger entry in insertion order.
    fn ledger_entries(&self) -> Result<Vec<LedgerEntry>, StoreError>;
}

/// Storage mode, fixed once at process startup.
#[derive(Debug, Clone)]
pub enum StorageMode {
    /// Durable SQLite database at the given path.
    Durable(PathBuf),
    /// Volatile in-process tables; contents die with the process.
    Volatile,
}

/// Opens the backend for the selected mode.
///
/// Called once at startup; the returned handle is shared by every
/// request-scoped operation for the life of the process.
pub fn open_backend(mode: &StorageMode) -> Result<Arc<dyn StorageBackend>, StoreError> {
    match mode {
        StorageMode::Durable(path) => {
            log::info!("opening durable store at {}", path.display());
            Ok(Arc::new(SqliteBackend::open(path)?))
        }
        StorageMode::Volatile => {
            log::info!("opening volatile in-process store");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}
