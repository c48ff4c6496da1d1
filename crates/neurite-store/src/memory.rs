//! Volatile in-process backend.

use neurite_canonical::{ContentHash, SchemaId, Timestamp};
use parking_lot::Mutex;
use serde_json::Value;

use crate::backend::StorageBackend;
use crate::documents::StoredDocument;
use crate::error::StoreError;
use crate::ledger::LedgerEntry;

#[derive(Default)]
struct MemoryTables {
    documents: Vec<StoredDocument>,
    ledger: Vec<LedgerEntry>,
}

/// Volatile backend with the same observable semantics as the durable one.
///
/// Requests are still concurrent in volatile mode, so all access goes
/// through one mutex; the ledger append reads the head and inserts inside a
/// single lock hold.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<MemoryTables>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn insert_document(
        &self,
        schema_id: &SchemaId,
        content_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock();
        let id = tables.documents.len() as u64 + 1;
        tables.documents.push(StoredDocument {
            id,
            schema_id: schema_id.clone(),
            content_hash: content_hash.clone(),
            payload: payload.clone(),
            created_at: created_at.clone(),
        });
        Ok(id)
    }

    fn fetch_document(&self, id: u64) -> Result<Option<StoredDocument>, StoreError> {
        let tables = self.tables.lock();
        Ok(tables
            .documents
            .iter()
            .find(|doc| doc.id == id)
            .cloned())
    }

    fn append_entry(
        &self,
        event_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<Option<ContentHash>, StoreError> {
        let mut tables = self.tables.lock();
        let prev_hash = tables.ledger.last().map(|entry| entry.event_hash.clone());
        let id = tables.ledger.len() as u64 + 1;
        tables.ledger.push(LedgerEntry {
            id,
            event_hash: event_hash.clone(),
            prev_hash: prev_hash.clone(),
            payload: payload.clone(),
            created_at: created_at.clone(),
        });
        Ok(prev_hash)
    }

    fn ledger_entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self.tables.lock().ledger.clone())
    }
}
