//! Ledger append command implementation.

use neurite_store::{open_backend, AuditLedger, StorageMode};
use serde_json::json;

use crate::commands::read_document;

pub fn run(mode: &StorageMode, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let event = read_document(input)?;

    let backend = open_backend(mode)?;
    let ledger = AuditLedger::new(backend);
    let receipt = ledger.append(&event)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "event_hash": receipt.event_hash,
            "prev_hash": receipt.prev_hash,
        }))?
    );
    Ok(())
}
