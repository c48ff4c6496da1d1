//! Volatile in-process registry backend.

use std::collections::BTreeMap;

use neurite_canonical::{Did, Timestamp};
use parking_lot::Mutex;
use serde_json::Value;

use crate::backend::RegistryBackend;
use crate::error::RegistryError;
use crate::types::{Attestation, ResolvedDid, SignatureEntry};

struct StoredRecord {
    document: Value,
    signatures: Vec<SignatureEntry>,
}

#[derive(Default)]
struct RegistryTables {
    // Attestations are keyed separately so they survive record replacement.
    records: BTreeMap<String, StoredRecord>,
    attestations: BTreeMap<String, Vec<Attestation>>,
}

/// Volatile registry backend; identical observable semantics to the durable
/// one, with state owned by the process.
#[derive(Default)]
pub struct MemoryRegistryBackend {
    tables: Mutex<RegistryTables>,
}

impl MemoryRegistryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryBackend for MemoryRegistryBackend {
    fn put_record(
        &self,
        did: &Did,
        document: &Value,
        signatures: &[SignatureEntry],
        _created_at: &Timestamp,
    ) -> Result<(), RegistryError> {
        let mut tables = self.tables.lock();
        tables.records.insert(
            did.as_ref().to_string(),
            StoredRecord {
                document: document.clone(),
                signatures: signatures.to_vec(),
            },
        );
        Ok(())
    }

    fn append_attestation(
        &self,
        did: &Did,
        attestation: &Attestation,
    ) -> Result<(), RegistryError> {
        let mut tables = self.tables.lock();
        if !tables.records.contains_key(did.as_ref()) {
            return Err(RegistryError::NotFound { did: did.clone() });
        }
        tables
            .attestations
            .entry(did.as_ref().to_string())
            .or_default()
            .push(attestation.clone());
        Ok(())
    }

    fn fetch(&self, did: &Did) -> Result<Option<ResolvedDid>, RegistryError> {
        let tables = self.tables.lock();
        let record = match tables.records.get(did.as_ref()) {
            Some(record) => record,
            None => return Ok(None),
        };
        Ok(Some(ResolvedDid {
            did: did.clone(),
            document: record.document.clone(),
            signatures: record.signatures.clone(),
            attestations: tables
                .attestations
                .get(did.as_ref())
                .cloned()
                .unwrap_or_default(),
        }))
    }
}
