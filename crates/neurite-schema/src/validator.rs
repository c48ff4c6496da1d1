//! Validator contract and the shipped structural validator.
//!
//! Deployments that need full JSON Schema semantics plug their engine in
//! behind [`SchemaValidator`]; the core only consumes the pass/fail result
//! and the structured violation list, and never retries a failure.

use neurite_canonical::SchemaId;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::repository::SchemaDocument;

/// A single violated constraint.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    /// JSON path of the offending member (`root` for document-level issues).
    pub path: String,
    /// The violated constraint (`required`, `type`, ...).
    pub constraint: String,
    /// Human-readable detail.
    pub message: String,
}

/// Validation failure carrying every violated constraint.
#[derive(Debug, Error)]
#[error("document failed validation against {schema_id}: {} violation(s)", .violations.len())]
pub struct ValidationFailure {
    /// Schema the document was validated against.
    pub schema_id: SchemaId,
    /// All violated constraints, in document order.
    pub violations: Vec<Violation>,
}

/// Contract consumed by the ingest pipeline.
pub trait SchemaValidator: Send + Sync {
    /// Checks `document` against `schema`, returning the schema's canonical
    /// identifier on success.
    fn validate(
        &self,
        schema: &SchemaDocument,
        document: &Value,
    ) -> Result<SchemaId, ValidationFailure>;
}

/// Structural validator shipped with the core.
///
/// Enforces the definition's top-level `required` member list and the `type`
/// tags under `properties`. Anything beyond that subset is the external
/// engine's concern.
#[derive(Debug, Default)]
pub struct FieldConstraintValidator;

impl FieldConstraintValidator {
    /// Creates the validator.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for FieldConstraintValidator {
    fn validate(
        &self,
        schema: &SchemaDocument,
        document: &Value,
    ) -> Result<SchemaId, ValidationFailure> {
        let mut violations = Vec::new();

        let members = match document.as_object() {
            Some(members) => members,
            None => {
                return Err(ValidationFailure {
                    schema_id: schema.id.clone(),
                    violations: vec![Violation {
                        path: "root".to_string(),
                        constraint: "type".to_string(),
                        message: "document is not an object".to_string(),
                    }],
                })
            }
        };

        if let Some(required) = schema.definition.get("required").and_then(Value::as_array) {
            for field in required.iter().filter_map(Value::as_str) {
                if !members.contains_key(field) {
                    violations.push(Violation {
                        path: field.to_string(),
                        constraint: "required".to_string(),
                        message: format!("missing required member {:?}", field),
                    });
                }
            }
        }

        if let Some(properties) = schema.definition.get("properties").and_then(Value::as_object) {
            for (field, spec) in properties {
                let expected = match spec.get("type").and_then(Value::as_str) {
                    Some(expected) => expected,
                    None => continue,
                };
                let value = match members.get(field) {
                    Some(value) => value,
                    None => continue,
                };
                if !type_matches(expected, value) {
                    violations.push(Violation {
                        path: field.clone(),
                        constraint: "type".to_string(),
                        message: format!("expected {}, got {}", expected, type_name(value)),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(schema.id.clone())
        } else {
            Err(ValidationFailure {
                schema_id: schema.id.clone(),
                violations,
            })
        }
    }
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurite_canonical::SchemaId;
    use serde_json::json;

    fn schema(definition: Value) -> SchemaDocument {
        SchemaDocument {
            id: SchemaId::new("interface_record.schema.json".into()),
            definition,
        }
    }

    #[test]
    fn passing_document_returns_schema_id() {
        let schema = schema(json!({
            "required": ["substrate_id", "io_profile"],
            "properties": {
                "substrate_id": {"type": "string"},
                "io_profile": {"type": "object"}
            }
        }));
        let validator = FieldConstraintValidator::new();
        let id = validator
            .validate(&schema, &json!({"substrate_id": "s1", "io_profile": {}}))
            .unwrap();
        assert_eq!(id.as_ref(), "interface_record.schema.json");
    }

    #[test]
    fn missing_required_members_are_all_reported() {
        let schema = schema(json!({"required": ["substrate_id", "io_profile"]}));
        let validator = FieldConstraintValidator::new();
        let failure = validator.validate(&schema, &json!({})).unwrap_err();
        assert_eq!(failure.violations.len(), 2);
        assert!(failure
            .violations
            .iter()
            .all(|v| v.constraint == "required"));
    }

    #[test]
    fn wrong_member_type_is_reported_with_both_types() {
        let schema = schema(json!({
            "properties": {"substrate_id": {"type": "string"}}
        }));
        let validator = FieldConstraintValidator::new();
        let failure = validator
            .validate(&schema, &json!({"substrate_id": 42}))
            .unwrap_err();
        assert_eq!(failure.violations.len(), 1);
        assert_eq!(failure.violations[0].constraint, "type");
        assert!(failure.violations[0].message.contains("string"));
        assert!(failure.violations[0].message.contains("number"));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let schema = schema(json!({}));
        let validator = FieldConstraintValidator::new();
        assert!(validator.validate(&schema, &json!([1])).is_err());
    }
}
