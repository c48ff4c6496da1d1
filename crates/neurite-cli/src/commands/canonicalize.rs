//! Canonicalize command implementation.

use neurite_canonical::Canonicalizer;

use crate::commands::read_document;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_document(input)?;

    let canonicalizer = Canonicalizer::new();
    let bytes = canonicalizer
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
