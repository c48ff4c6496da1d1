//! Hash-chained audit ledger.

use std::sync::Arc;

use neurite_canonical::{hash_value, Canonicalizer, ContentHash, Timestamp};
use serde::Serialize;
use serde_json::Value;

use crate::backend::StorageBackend;
use crate::clock;
use crate::error::StoreError;

/// One entry in the chain.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    /// Backend-assigned sequence id.
    pub id: u64,
    /// Digest of this entry's payload.
    pub event_hash: ContentHash,
    /// `event_hash` of the entry inserted immediately before this one;
    /// absent only for the first entry.
    pub prev_hash: Option<ContentHash>,
    /// The event payload.
    pub payload: Value,
    /// Insertion time.
    pub created_at: Timestamp,
}

/// Receipt returned by a successful append.
#[derive(Debug, Clone, Serialize)]
pub struct AppendReceipt {
    /// Digest of the appended payload.
    pub event_hash: ContentHash,
    /// Digest of the previous head, absent for the first entry.
    pub prev_hash: Option<ContentHash>,
}

/// Outcome of a full-chain replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChainVerdict {
    /// Every entry links to its predecessor and hashes to its payload.
    Intact {
        /// Number of entries replayed.
        length: u64,
    },
    /// The chain is inconsistent at the named entry.
    Broken {
        /// Sequence id of the first inconsistent entry.
        id: u64,
        /// What went wrong.
        reason: String,
    },
}

impl ChainVerdict {
    /// Whether the replay found no inconsistency.
    pub fn is_intact(&self) -> bool {
        matches!(self, ChainVerdict::Intact { .. })
    }
}

/// Append-only hash chain of audit events.
///
/// Each entry binds to the digest of its immediate predecessor, so an
/// auditor replaying the chain can prove no entry was inserted, altered, or
/// reordered without detection. The chain is never rewritten or truncated.
pub struct AuditLedger {
    backend: Arc<dyn StorageBackend>,
    canonicalizer: Canonicalizer,
}

impl AuditLedger {
    /// Creates a ledger over the shared backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// Hashes the payload and appends it to the chain.
    ///
    /// The backend links the entry to the current head atomically, so
    /// concurrent appends always produce one linear chain. On failure the
    /// chain is left unchanged; there are no partial entries.
    pub fn append(&self, payload: &Value) -> Result<AppendReceipt, StoreError> {
        let event_hash = hash_value(payload, &self.canonicalizer)?;
        let created_at = clock::now_utc();
        let prev_hash = self
            .backend
            .append_entry(&event_hash, payload, &created_at)?;
        Ok(AppendReceipt {
            event_hash,
            prev_hash,
        })
    }

    /// Returns every entry in insertion order.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        self.backend.ledger_entries()
    }

    /// Replays the whole chain from the first entry.
    ///
    /// Checks that each entry's recorded `prev_hash` equals the actual
    /// `event_hash` of its predecessor, that exactly one entry has no
    /// predecessor, and that each `event_hash` still matches its payload.
    pub fn verify(&self) -> Result<ChainVerdict, StoreError> {
        let entries = self.backend.ledger_entries()?;
        let mut expected_prev: Option<ContentHash> = None;

        for entry in &entries {
            if entry.prev_hash != expected_prev {
                return Ok(ChainVerdict::Broken {
                    id: entry.id,
                    reason: format!(
                        "prev_hash {:?} does not match predecessor {:?}",
                        entry.prev_hash.as_ref().map(ContentHash::as_str),
                        expected_prev.as_ref().map(ContentHash::as_str)
                    ),
                });
            }
            let recomputed = hash_value(&entry.payload, &self.canonicalizer)?;
            if recomputed != entry.event_hash {
                return Ok(ChainVerdict::Broken {
                    id: entry.id,
                    reason: "event_hash does not match payload".to_string(),
                });
            }
            expected_prev = Some(entry.event_hash.clone());
        }

        Ok(ChainVerdict::Intact {
            length: entries.len() as u64,
        })
    }
}
