//! DID attest command implementation.

use neurite_canonical::Did;
use neurite_registry::{open_registry_backend, IdentityRegistry, RegistryMode};
use serde_json::json;

use crate::commands::read_document;

pub fn run(
    mode: &RegistryMode,
    did: String,
    input: Option<String>,
    signature: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let did = Did::parse(&did).map_err(|e| format!("Invalid DID: {}", e))?;
    let attestation = read_document(input)?;

    let backend = open_registry_backend(mode)?;
    let registry = IdentityRegistry::new(backend);
    registry.attest(&did, attestation, signature)?;

    println!("{}", serde_json::to_string_pretty(&json!({"status": "ok"}))?);
    Ok(())
}
