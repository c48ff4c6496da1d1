//! Document classification against the schema repository.
//!
//! Resolution order: explicit `$schema` marker, then a `type` suffix match,
//! then the heuristic rule table. The table is data evaluated top-to-bottom,
//! so the priority between overlapping shapes is fixed and testable rather
//! than scattered through conditionals.

use neurite_canonical::SchemaId;
use serde_json::{Map, Value};

use crate::repository::SchemaRepository;

/// One heuristic rule: a field-shape predicate and the schema it selects.
pub struct ClassificationRule {
    /// Human-readable rule name, used in logs.
    pub label: &'static str,
    /// Schema-id suffix resolved against the repository when the rule fires.
    pub target_suffix: &'static str,
    /// Predicate over the document's top-level members.
    pub applies: fn(&Map<String, Value>) -> bool,
}

/// Heuristic rules in priority order. The first rule whose predicate holds
/// decides the classification; later rules are not consulted.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        label: "interface-record",
        target_suffix: "interface_record.schema.json",
        applies: has_interface_record_shape,
    },
    ClassificationRule {
        label: "intent-declaration",
        target_suffix: "intent_declaration.schema.json",
        applies: has_intent_declaration_shape,
    },
    ClassificationRule {
        label: "session-log",
        target_suffix: "session_log.schema.json",
        applies: has_session_log_shape,
    },
];

fn has_interface_record_shape(map: &Map<String, Value>) -> bool {
    map.contains_key("substrate_id") && map.contains_key("io_profile")
}

fn has_intent_declaration_shape(map: &Map<String, Value>) -> bool {
    map.contains_key("intent") && map.contains_key("payload")
}

fn has_session_log_shape(map: &Map<String, Value>) -> bool {
    map.get("events").map(Value::is_array).unwrap_or(false)
}

/// Classifies a document against the repository.
///
/// Returns `None` when no resolution step succeeds; callers surface that as
/// a `SchemaUndetected` client error. Repeated calls on the same document
/// and repository always return the same identifier.
pub fn classify(document: &Value, repository: &SchemaRepository) -> Option<SchemaId> {
    let map = document.as_object()?;

    if let Some(marker) = map.get("$schema").and_then(Value::as_str) {
        if let Some(schema) = repository.get(marker) {
            log::debug!("classified by explicit marker: {}", schema.id);
            return Some(schema.id.clone());
        }
    }

    if let Some(doc_type) = map.get("type").and_then(Value::as_str) {
        let schema = repository
            .find_by_suffix(&format!("{}.schema.json", doc_type))
            .or_else(|| repository.find_by_suffix(doc_type));
        if let Some(schema) = schema {
            log::debug!("classified by type suffix {:?}: {}", doc_type, schema.id);
            return Some(schema.id.clone());
        }
    }

    for rule in CLASSIFICATION_RULES {
        if (rule.applies)(map) {
            // First matching predicate decides, even when its target schema
            // is absent from the repository.
            let resolved = repository.find_by_suffix(rule.target_suffix);
            match &resolved {
                Some(schema) => {
                    log::info!("classified by rule {}: {}", rule.label, schema.id)
                }
                None => log::warn!(
                    "rule {} matched but no repository schema ends with {}",
                    rule.label,
                    rule.target_suffix
                ),
            }
            return resolved.map(|schema| schema.id.clone());
        }
    }

    log::debug!("no classification for document");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repository() -> SchemaRepository {
        SchemaRepository::from_definitions([
            (
                SchemaId::new("https://schemas.example.org/interface_record.schema.json".into()),
                json!({}),
            ),
            (
                SchemaId::new("https://schemas.example.org/intent_declaration.schema.json".into()),
                json!({}),
            ),
            (
                SchemaId::new("https://schemas.example.org/session_log.schema.json".into()),
                json!({}),
            ),
        ])
    }

    #[test]
    fn explicit_marker_wins_over_heuristics() {
        let repo = repository();
        let doc = json!({
            "$schema": "https://schemas.example.org/session_log.schema.json",
            "substrate_id": "s1",
            "io_profile": {}
        });
        let id = classify(&doc, &repo).unwrap();
        assert!(id.as_ref().ends_with("session_log.schema.json"));
    }

    #[test]
    fn unknown_marker_falls_through_to_heuristics() {
        let repo = repository();
        let doc = json!({
            "$schema": "https://schemas.example.org/unknown.schema.json",
            "intent": "move",
            "payload": {}
        });
        let id = classify(&doc, &repo).unwrap();
        assert!(id.as_ref().ends_with("intent_declaration.schema.json"));
    }

    #[test]
    fn type_field_matches_suffix_case_insensitively() {
        let repo = repository();
        let doc = json!({"type": "SESSION_LOG.SCHEMA.JSON"});
        let id = classify(&doc, &repo).unwrap();
        assert!(id.as_ref().ends_with("session_log.schema.json"));
    }

    #[test]
    fn bare_type_name_resolves_through_schema_file_suffix() {
        let repo = repository();
        let doc = json!({"type": "interface_record"});
        let id = classify(&doc, &repo).unwrap();
        assert!(id.as_ref().ends_with("interface_record.schema.json"));
    }

    #[test]
    fn interface_shape_outranks_session_shape() {
        let repo = repository();
        let doc = json!({
            "substrate_id": "s1",
            "io_profile": {},
            "events": []
        });
        let id = classify(&doc, &repo).unwrap();
        assert!(id.as_ref().ends_with("interface_record.schema.json"));
    }

    #[test]
    fn events_must_be_a_sequence() {
        let repo = repository();
        assert!(classify(&json!({"events": "not-a-list"}), &repo).is_none());
        assert!(classify(&json!({"events": []}), &repo).is_some());
    }

    #[test]
    fn classification_is_deterministic() {
        let repo = repository();
        let doc = json!({"intent": "move", "payload": {"axis": "x"}});
        let first = classify(&doc, &repo);
        let second = classify(&doc, &repo);
        assert_eq!(first, second);
    }

    #[test]
    fn unrecognized_document_is_undetected() {
        let repo = repository();
        assert!(classify(&json!({"foo": 1}), &repo).is_none());
        assert!(classify(&json!([1, 2, 3]), &repo).is_none());
    }
}
