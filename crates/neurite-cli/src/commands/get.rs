//! Get command implementation.

use neurite_store::{open_backend, DocumentStore, StorageMode};

pub fn run(mode: &StorageMode, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let backend = open_backend(mode)?;
    let store = DocumentStore::new(backend);
    let payload = store.get(id)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
