//! DID resolve command implementation.

use neurite_canonical::Did;
use neurite_registry::{open_registry_backend, IdentityRegistry, RegistryMode};

pub fn run(mode: &RegistryMode, did: String) -> Result<(), Box<dyn std::error::Error>> {
    let did = Did::parse(&did).map_err(|e| format!("Invalid DID: {}", e))?;

    let backend = open_registry_backend(mode)?;
    let registry = IdentityRegistry::new(backend);
    let resolved = registry.resolve(&did)?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
