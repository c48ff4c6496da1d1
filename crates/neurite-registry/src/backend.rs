//! Registry backend contract and startup-time mode selection.

use std::path::PathBuf;
use std::sync::Arc;

use neurite_canonical::{Did, Timestamp};
use serde_json::Value;

use crate::error::RegistryError;
use crate::memory::MemoryRegistryBackend;
use crate::sqlite::SqliteRegistryBackend;
use crate::types::{Attestation, ResolvedDid, SignatureEntry};

/// Backend contract shared by the durable and volatile registry variants.
///
/// Both variants must observe identical semantics: last-write-wins document
/// replacement, append-only attestation history retained across
/// re-registration, and an atomic existence check inside
/// [`append_attestation`].
///
/// [`append_attestation`]: RegistryBackend::append_attestation
pub trait RegistryBackend: Send + Sync {
    /// Inserts or replaces the record for `did`.
    fn put_record(
        &self,
        did: &Did,
        document: &Value,
        signatures: &[SignatureEntry],
        created_at: &Timestamp,
    ) -> Result<(), RegistryError>;

    /// Appends to `did`'s attestation sequence; `NotFound` when the DID has
    /// never been registered.
    fn append_attestation(&self, did: &Did, attestation: &Attestation)
        -> Result<(), RegistryError>;

    /// Fetches the full current state of `did`; `None` when never registered.
    fn fetch(&self, did: &Did) -> Result<Option<ResolvedDid>, RegistryError>;
}

/// Registry storage mode, fixed once at process startup.
#[derive(Debug, Clone)]
pub enum RegistryMode {
    /// Durable SQLite database at the given path.
    Durable(PathBuf),
    /// Volatile in-process maps; contents die with the process.
    Volatile,
}

/// Opens the registry backend for the selected mode.
pub fn open_registry_backend(
    mode: &RegistryMode,
) -> Result<Arc<dyn RegistryBackend>, RegistryError> {
    match mode {
        RegistryMode::Durable(path) => {
            log::info!("opening durable registry at {}", path.display());
            Ok(Arc::new(SqliteRegistryBackend::open(path)?))
        }
        RegistryMode::Volatile => {
            log::info!("opening volatile in-process registry");
            Ok(Arc::new(MemoryRegistryBackend::new()))
        }
    }
}
