//! Content-addressed document store.

use std::sync::Arc;

use neurite_canonical::{hash_value, Canonicalizer, ContentHash, SchemaId, Timestamp};
use serde::Serialize;
use serde_json::Value;

use crate::backend::StorageBackend;
use crate::clock;
use crate::error::StoreError;

/// A persisted document row.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    /// Store-assigned sequential id.
    pub id: u64,
    /// Schema the document validated against.
    pub schema_id: SchemaId,
    /// Digest of the document's canonical form.
    pub content_hash: ContentHash,
    /// The document itself, unchanged.
    pub payload: Value,
    /// Insertion time.
    pub created_at: Timestamp,
}

/// Receipt returned by a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReceipt {
    /// Store-assigned id.
    pub id: u64,
    /// Digest of the stored payload.
    pub content_hash: ContentHash,
    /// Schema the document validated against.
    pub schema_id: SchemaId,
}

/// Append-only store for classified, validated documents.
///
/// There is no update or delete: amendment means inserting a new document,
/// so every content hash stays permanently verifiable against the original
/// bytes.
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    canonicalizer: Canonicalizer,
}

impl DocumentStore {
    /// Creates a store over the shared backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// Persists an already-classified, already-validated document.
    pub fn ingest(&self, schema_id: SchemaId, payload: &Value) -> Result<DocumentReceipt, StoreError> {
        let content_hash = hash_value(payload, &self.canonicalizer)?;
        let created_at = clock::now_utc();
        let id = self
            .backend
            .insert_document(&schema_id, &content_hash, payload, &created_at)?;
        Ok(DocumentReceipt {
            id,
            content_hash,
            schema_id,
        })
    }

    /// Returns the stored payload, unchanged.
    pub fn get(&self, id: u64) -> Result<Value, StoreError> {
        self.backend
            .fetch_document(id)?
            .map(|doc| doc.payload)
            .ok_or(StoreError::NotFound { id })
    }

    /// Returns the full stored record.
    pub fn get_record(&self, id: u64) -> Result<StoredDocument, StoreError> {
        self.backend
            .fetch_document(id)?
            .ok_or(StoreError::NotFound { id })
    }
}
