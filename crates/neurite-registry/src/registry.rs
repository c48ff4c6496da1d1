//! The registry facade.

use std::sync::Arc;

use neurite_canonical::{hash_value, Canonicalizer, ContentHash, Did};
use serde_json::Value;

use crate::backend::RegistryBackend;
use crate::clock;
use crate::error::RegistryError;
use crate::types::{Attestation, ResolvedDid, SignatureEntry};

/// Registry of DID documents, signature sets, and attestation histories.
///
/// Constructed once at startup over the selected backend and passed by
/// handle into every request-scoped operation; there is no ambient global
/// state.
pub struct IdentityRegistry {
    backend: Arc<dyn RegistryBackend>,
    canonicalizer: Canonicalizer,
}

impl IdentityRegistry {
    /// Creates a registry over the shared backend.
    pub fn new(backend: Arc<dyn RegistryBackend>) -> Self {
        Self {
            backend,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// Registers `did`, replacing any existing document and signature set
    /// (last write wins; attestation history is retained). Returns the
    /// content hash of `document`.
    pub fn register(
        &self,
        did: &Did,
        document: &Value,
        signatures: Vec<SignatureEntry>,
    ) -> Result<ContentHash, RegistryError> {
        let content_hash = hash_value(document, &self.canonicalizer)?;
        self.backend
            .put_record(did, document, &signatures, &clock::now_utc())?;
        log::debug!("registered {} ({})", did, content_hash);
        Ok(content_hash)
    }

    /// Appends a claim to `did`'s attestation history.
    pub fn attest(
        &self,
        did: &Did,
        attestation: Value,
        signature: Option<String>,
    ) -> Result<(), RegistryError> {
        self.backend.append_attestation(
            did,
            &Attestation {
                attestation,
                signature,
                created_at: clock::now_utc(),
            },
        )
    }

    /// Resolves `did` to its full current state.
    pub fn resolve(&self, did: &Did) -> Result<ResolvedDid, RegistryError> {
        self.backend
            .fetch(did)?
            .ok_or_else(|| RegistryError::NotFound { did: did.clone() })
    }
}
