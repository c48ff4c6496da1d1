//! Output formatting utilities.

use neurite_store::LedgerEntry;

/// Formats a ledger entry as a simple table row.
pub fn format_entry_row(entry: &LedgerEntry) -> String {
    format!(
        "{:<6} {:<64} {}",
        entry.id,
        entry.event_hash.as_str(),
        entry
            .prev_hash
            .as_ref()
            .map(|hash| hash.as_str().to_string())
            .unwrap_or_else(|| "-".to_string())
    )
}

/// Prints the ledger table header.
pub fn print_entry_header() {
    println!("{:<6} {:<64} {}", "ID", "EVENT_HASH", "PREV_HASH");
    println!("{}", "-".repeat(136));
}
