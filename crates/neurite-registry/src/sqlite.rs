//! Durable SQLite registry backend.

use std::path::Path;

use neurite_canonical::{Did, Timestamp};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::backend::RegistryBackend;
use crate::error::RegistryError;
use crate::types::{Attestation, ResolvedDid, SignatureEntry};

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS did_records (
    did TEXT PRIMARY KEY,
    document TEXT NOT NULL,
    signatures TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS attestations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    did TEXT NOT NULL,
    attestation TEXT NOT NULL,
    signature TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_attestations_did ON attestations(did);
";

/// Durable registry backend over a single SQLite connection.
///
/// Re-registration updates the existing row in place, so attestation rows
/// keyed by the DID survive document replacement. The existence check inside
/// an attestation append runs in the same transaction as the insert.
pub struct SqliteRegistryBackend {
    conn: Mutex<Connection>,
}

impl SqliteRegistryBackend {
    /// Opens or creates a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database; used by tests that want SQLite
    /// semantics without a file.
    pub fn open_in_memory() -> Result<Self, RegistryError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl RegistryBackend for SqliteRegistryBackend {
    fn put_record(
        &self,
        did: &Did,
        document: &Value,
        signatures: &[SignatureEntry],
        created_at: &Timestamp,
    ) -> Result<(), RegistryError> {
        let document_text = serde_json::to_string(document)?;
        let signatures_text = serde_json::to_string(signatures)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO did_records (did, document, signatures, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(did) DO UPDATE SET
                 document = excluded.document,
                 signatures = excluded.signatures,
                 created_at = excluded.created_at",
            params![
                did.as_ref(),
                document_text,
                signatures_text,
                created_at.as_ref()
            ],
        )?;
        Ok(())
    }

    fn append_attestation(
        &self,
        did: &Did,
        attestation: &Attestation,
    ) -> Result<(), RegistryError> {
        let attestation_text = serde_json::to_string(&attestation.attestation)?;
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let registered: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM did_records WHERE did = ?1",
                params![did.as_ref()],
                |row| row.get(0),
            )
            .optional()?;
        if registered.is_none() {
            return Err(RegistryError::NotFound { did: did.clone() });
        }

        tx.execute(
            "INSERT INTO attestations (did, attestation, signature, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                did.as_ref(),
                attestation_text,
                attestation.signature.as_deref(),
                attestation.created_at.as_ref()
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn fetch(&self, did: &Did) -> Result<Option<ResolvedDid>, RegistryError> {
        let conn = self.conn.lock();
        let record: Option<(String, String)> = conn
            .query_row(
                "SELECT document, signatures FROM did_records WHERE did = ?1",
                params![did.as_ref()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (document_text, signatures_text) = match record {
            Some(record) => record,
            None => return Ok(None),
        };

        let mut stmt = conn.prepare(
            "SELECT attestation, signature, created_at
             FROM attestations WHERE did = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![did.as_ref()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);
        drop(conn);

        let mut attestations = Vec::with_capacity(rows.len());
        for (attestation_text, signature, created_at) in rows {
            attestations.push(Attestation {
                attestation: serde_json::from_str(&attestation_text)?,
                signature,
                created_at: Timestamp::parse(created_at)?,
            });
        }

        Ok(Some(ResolvedDid {
            did: did.clone(),
            document: serde_json::from_str(&document_text)?,
            signatures: serde_json::from_str(&signatures_text)?,
            attestations,
        }))
    }
}
