//! Ledger verify command implementation.

use neurite_store::{open_backend, AuditLedger, ChainVerdict, StorageMode};

use crate::output;

pub fn run(
    mode: &StorageMode,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = open_backend(mode)?;
    let ledger = AuditLedger::new(backend);

    let verdict = ledger.verify()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        output::print_entry_header();
        for entry in ledger.entries()? {
            println!("{}", output::format_entry_row(&entry));
        }
        match &verdict {
            ChainVerdict::Intact { length } => {
                println!("Chain intact: {} entries", length);
            }
            ChainVerdict::Broken { id, reason } => {
                println!("Chain BROKEN at entry {}: {}", id, reason);
            }
        }
    }

    if strict && !verdict.is_intact() {
        std::process::exit(1);
    }

    Ok(())
}
