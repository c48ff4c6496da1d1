//! DID register command implementation.

use neurite_canonical::Did;
use neurite_registry::{open_registry_backend, IdentityRegistry, RegistryMode, SignatureEntry};
use serde_json::json;

use crate::commands::read_document;

pub fn run(
    mode: &RegistryMode,
    did: String,
    input: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let did = Did::parse(&did).map_err(|e| format!("Invalid DID: {}", e))?;
    let body = read_document(input)?;

    // The request body carries the document plus an optional signature set.
    let document = body
        .get("document")
        .cloned()
        .ok_or("Request body must carry a \"document\" member")?;
    let signatures: Vec<SignatureEntry> = match body.get("signatures") {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid signatures: {}", e))?,
        None => Vec::new(),
    };

    let backend = open_registry_backend(mode)?;
    let registry = IdentityRegistry::new(backend);
    let hash = registry.register(&did, &document, signatures)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({"status": "ok", "hash": hash}))?
    );
    Ok(())
}
