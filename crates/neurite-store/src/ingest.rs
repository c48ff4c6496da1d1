//! Classification + validation + storage pipeline.

use neurite_schema::{classify, SchemaRepository, SchemaValidator, ValidationFailure};
use serde_json::Value;
use thiserror::Error;

use crate::documents::{DocumentReceipt, DocumentStore};
use crate::error::StoreError;

/// Errors surfaced to the boundary layer by [`IngestService::ingest`].
#[derive(Error, Debug)]
pub enum IngestError {
    /// No schema classification succeeded; the client must supply a
    /// recognizable document. Not retried.
    #[error("no schema classification succeeded for document")]
    SchemaUndetected,
    /// The document failed validation against its classified schema. The
    /// validator's violation detail is carried verbatim. Not retried.
    #[error(transparent)]
    SchemaValidationFailed(#[from] ValidationFailure),
    /// The backend could not complete the write; state is unchanged.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Ingestion pipeline for inbound documents.
///
/// Constructed once at startup with the process-lifetime repository,
/// validator, and store; each inbound document flows through
/// classify → validate → hash → persist.
pub struct IngestService {
    repository: SchemaRepository,
    validator: Box<dyn SchemaValidator>,
    store: DocumentStore,
}

impl IngestService {
    /// Builds the pipeline.
    pub fn new(
        repository: SchemaRepository,
        validator: Box<dyn SchemaValidator>,
        store: DocumentStore,
    ) -> Self {
        Self {
            repository,
            validator,
            store,
        }
    }

    /// Classifies, validates, and persists one document.
    pub fn ingest(&self, document: &Value) -> Result<DocumentReceipt, IngestError> {
        let schema_id =
            classify(document, &self.repository).ok_or(IngestError::SchemaUndetected)?;
        let schema = self
            .repository
            .get(schema_id.as_ref())
            .ok_or(IngestError::SchemaUndetected)?;
        let validated = self.validator.validate(schema, document)?;
        Ok(self.store.ingest(validated, document)?)
    }

    /// The underlying document store, for reads.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The schema repository backing classification.
    pub fn repository(&self) -> &SchemaRepository {
        &self.repository
    }
}
