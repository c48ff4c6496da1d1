use neurite_schema::{classify, FieldConstraintValidator, SchemaRepository, SchemaValidator};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_schema(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).unwrap();
}

fn seed_repository(dir: &TempDir) -> SchemaRepository {
    write_schema(
        dir,
        "interface_record.schema.json",
        r#"{
            "$id": "https://schemas.example.org/interface_record.schema.json",
            "required": ["substrate_id", "io_profile"],
            "properties": {
                "substrate_id": {"type": "string"},
                "io_profile": {"type": "object"}
            }
        }"#,
    );
    write_schema(
        dir,
        "intent_declaration.schema.json",
        r#"{
            "$id": "https://schemas.example.org/intent_declaration.schema.json",
            "required": ["intent", "payload"]
        }"#,
    );
    write_schema(
        dir,
        "session_log.schema.json",
        r#"{
            "$id": "https://schemas.example.org/session_log.schema.json",
            "required": ["events"],
            "properties": {"events": {"type": "array"}}
        }"#,
    );
    SchemaRepository::load_dir(dir.path()).unwrap()
}

#[test]
fn classify_then_validate_interface_record() {
    let dir = TempDir::new().unwrap();
    let repository = seed_repository(&dir);

    let document = json!({"substrate_id": "s1", "io_profile": {}});
    let schema_id = classify(&document, &repository).unwrap();
    assert_eq!(
        schema_id.as_ref(),
        "https://schemas.example.org/interface_record.schema.json"
    );

    let schema = repository.get(schema_id.as_ref()).unwrap();
    let validated = FieldConstraintValidator::new()
        .validate(schema, &document)
        .unwrap();
    assert_eq!(validated, schema_id);
}

#[test]
fn validation_failure_lists_violations_verbatim() {
    let dir = TempDir::new().unwrap();
    let repository = seed_repository(&dir);

    let document = json!({"substrate_id": 7, "io_profile": {}});
    let schema_id = classify(&document, &repository).unwrap();
    let schema = repository.get(schema_id.as_ref()).unwrap();

    let failure = FieldConstraintValidator::new()
        .validate(schema, &document)
        .unwrap_err();
    assert_eq!(failure.schema_id, schema_id);
    assert_eq!(failure.violations.len(), 1);
    assert_eq!(failure.violations[0].path, "substrate_id");
}

#[test]
fn broken_schema_file_does_not_block_the_rest() {
    let dir = TempDir::new().unwrap();
    write_schema(&dir, "broken.schema.json", "{truncated");
    let repository = seed_repository(&dir);

    assert_eq!(repository.len(), 3);
    assert!(classify(&json!({"events": []}), &repository).is_some());
}
