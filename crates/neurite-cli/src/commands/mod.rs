//! Command implementations.

pub mod append;
pub mod attest;
pub mod canonicalize;
pub mod get;
pub mod ingest;
pub mod register;
pub mod resolve;
pub mod schemas;
pub mod verify;

use serde_json::Value;
use std::io::{self, Read};

/// Reads a JSON document from a file argument or stdin.
pub fn read_document(input: Option<String>) -> Result<Value, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok(value)
}
