use canonical_json::to_string;
use serde_json::Value;

use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided JSON could not be canonicalized.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure from the canonical serializer.
    #[error("other error: {0}")]
    Other(String),
}

/// Helper for building JSON paths in error messages.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
///
/// Object members are sorted lexicographically at every nesting level and no
/// insignificant whitespace is emitted, so two semantically equal documents
/// produce identical bytes regardless of original key order.
#[derive(Debug, Default, Clone)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces the canonical bytes for the provided value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        self.validate(value, Path::root())?;

        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Other(format!("{:?}", err)))?;
        Ok(canonical.into_bytes())
    }

    /// Validates the JSON value before serialization, tracking the path so
    /// failures point at the offending member.
    fn validate(&self, value: &Value, path: Path) -> Result<(), CanonicalizationError> {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    self.validate(child, path.push_field(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.validate(item, path.push_index(idx))?;
                }
                Ok(())
            }
            Value::Number(num) => {
                if num.is_f64() {
                    let finite = num.as_f64().map(f64::is_finite).unwrap_or(false);
                    if !finite {
                        return Err(CanonicalizationError::NonFiniteNumber(format!("{}", path)));
                    }
                }
                Ok(())
            }
            Value::String(s) => {
                if s.chars().any(|c| c as u32 > 0x10FFFF) {
                    return Err(CanonicalizationError::InvalidStructure(format!(
                        "{}: invalid UTF-8",
                        path
                    )));
                }
                Ok(())
            }
            Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_keys_at_every_level() {
        let canonicalizer = Canonicalizer::new();
        let value = json!({"b": {"z": 1, "a": 2}, "a": true});
        let bytes = canonicalizer.canonicalize(&value).unwrap();
        assert_eq!(bytes, br#"{"a":true,"b":{"a":2,"z":1}}"#.to_vec());
    }

    #[test]
    fn key_order_does_not_change_output() {
        let canonicalizer = Canonicalizer::new();
        let first: Value = serde_json::from_str(r#"{"x": 1, "y": [2, 3]}"#).unwrap();
        let second: Value = serde_json::from_str(r#"{ "y" : [ 2 , 3 ] , "x" : 1 }"#).unwrap();
        assert_eq!(
            canonicalizer.canonicalize(&first).unwrap(),
            canonicalizer.canonicalize(&second).unwrap()
        );
    }

    #[test]
    fn repeated_calls_are_stable() {
        let canonicalizer = Canonicalizer::new();
        let value = json!({"events": [{"op": "calibrate"}, {"op": "run"}]});
        let first = canonicalizer.canonicalize(&value).unwrap();
        let second = canonicalizer.canonicalize(&value).unwrap();
        assert_eq!(first, second);
    }
}
