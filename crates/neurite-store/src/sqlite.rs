//! Durable SQLite backend.

use std::path::Path;

use neurite_canonical::{ContentHash, SchemaId, Timestamp};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::backend::StorageBackend;
use crate::documents::StoredDocument;
use crate::error::StoreError;
use crate::ledger::LedgerEntry;

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    schema_id TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS ledger_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_hash TEXT NOT NULL,
    prev_hash TEXT,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// Durable backend over a single SQLite connection.
///
/// The connection sits behind a mutex, so every operation is serialized;
/// the ledger append additionally runs in one transaction, making the
/// read-head + insert step atomic even against other processes on the same
/// database file.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Opens or creates a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database; used by tests that want SQLite
    /// semantics without a file.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl StorageBackend for SqliteBackend {
    fn insert_document(
        &self,
        schema_id: &SchemaId,
        content_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<u64, StoreError> {
        let payload_text = serde_json::to_string(payload)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO documents (schema_id, content_hash, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                schema_id.as_ref(),
                content_hash.as_str(),
                payload_text,
                created_at.as_ref()
            ],
        )?;
        Ok(conn.last_insert_rowid() as u64)
    }

    fn fetch_document(&self, id: u64) -> Result<Option<StoredDocument>, StoreError> {
        let conn = self.conn.lock();
        let row: Option<(String, String, String, String)> = conn
            .query_row(
                "SELECT schema_id, content_hash, payload, created_at
                 FROM documents WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                    ))
                },
            )
            .optional()?;
        drop(conn);

        match row {
            None => Ok(None),
            Some((schema_id, content_hash, payload, created_at)) => Ok(Some(StoredDocument {
                id,
                schema_id: SchemaId::new(schema_id),
                content_hash: ContentHash::parse(content_hash)?,
                payload: serde_json::from_str(&payload)?,
                created_at: Timestamp::parse(created_at)?,
            })),
        }
    }

    fn append_entry(
        &self,
        event_hash: &ContentHash,
        payload: &Value,
        created_at: &Timestamp,
    ) -> Result<Option<ContentHash>, StoreError> {
        let payload_text = serde_json::to_string(payload)?;
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let prev: Option<String> = tx
            .query_row(
                "SELECT event_hash FROM ledger_entries ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        tx.execute(
            "INSERT INTO ledger_entries (event_hash, prev_hash, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                event_hash.as_str(),
                prev.as_deref(),
                payload_text,
                created_at.as_ref()
            ],
        )?;
        tx.commit()?;
        drop(conn);

        prev.map(ContentHash::parse).transpose().map_err(Into::into)
    }

    fn ledger_entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, event_hash, prev_hash, payload, created_at
             FROM ledger_entries ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);
        drop(conn);

        let mut entries = Vec::with_capacity(rows.len());
        for (id, event_hash, prev_hash, payload, created_at) in rows {
            entries.push(LedgerEntry {
                id: id as u64,
                event_hash: ContentHash::parse(event_hash)?,
                prev_hash: prev_hash.map(ContentHash::parse).transpose()?,
                payload: serde_json::from_str(&payload)?,
                created_at: Timestamp::parse(created_at)?,
            });
        }
        Ok(entries)
    }
}
