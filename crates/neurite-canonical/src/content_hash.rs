//! Content-hash computation over canonical bytes.
//!
//! A content hash is `sha256(canonical_bytes(document))`, rendered as 64
//! lowercase hex characters. Numbers are stringified before canonicalization
//! so documents carrying fractional quantities hash deterministically under
//! the canonical profile.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::canonicalizer::{CanonicalizationError, Canonicalizer};
use crate::validation::ValidationError;

/// SHA-256 digest of a document's canonical form, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Computes the digest of raw bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        ContentHash(hex::encode(hasher.finalize()))
    }

    /// Parses a validated hex digest from a string.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "content_hash",
                value: s,
            });
        }
        Ok(ContentHash(s))
    }

    /// Returns the hex digest text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes the content hash of a structured document.
///
/// The `event_hash` of a ledger entry and the document hash returned by the
/// registry are both produced by this function, so a digest computed by any
/// component can be re-checked against any other.
pub fn hash_value(
    value: &Value,
    canonicalizer: &Canonicalizer,
) -> Result<ContentHash, CanonicalizationError> {
    let mut prepared = value.clone();
    stringify_numbers(&mut prepared);
    let bytes = canonicalizer.canonicalize(&prepared)?;
    Ok(ContentHash::compute(&bytes))
}

/// Recursively converts all JSON numbers into strings.
fn stringify_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v);
            }
        }
        _ => {}
    }
}
