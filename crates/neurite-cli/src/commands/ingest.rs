//! Ingest command implementation.

use std::path::Path;

use neurite_schema::{FieldConstraintValidator, SchemaRepository};
use neurite_store::{open_backend, DocumentStore, IngestService, StorageMode};
use serde_json::json;

use crate::commands::read_document;

pub fn run(
    mode: &StorageMode,
    schema_dir: &Path,
    input: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_document(input)?;

    let repository = SchemaRepository::load_dir(schema_dir)
        .map_err(|e| format!("Failed to load schema directory {}: {}", schema_dir.display(), e))?;
    let backend = open_backend(mode)?;
    let service = IngestService::new(
        repository,
        Box::new(FieldConstraintValidator::new()),
        DocumentStore::new(backend),
    );

    let receipt = service.ingest(&document)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "id": receipt.id,
            "hash": receipt.content_hash,
            "schema_id": receipt.schema_id,
        }))?
    );
    Ok(())
}
