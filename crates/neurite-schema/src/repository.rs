//! Read-only schema repository.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use neurite_canonical::SchemaId;
use serde_json::Value;

use crate::errors::SchemaError;

/// A schema definition held by the repository.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Canonical identifier (the definition's `$id`, or its file name).
    pub id: SchemaId,
    /// The schema definition itself; opaque to this crate beyond the
    /// structural members the shipped validator reads.
    pub definition: Value,
}

/// Maps schema identifiers to their definitions.
///
/// The repository is static for the lifetime of a process: it is populated
/// once at startup (from a directory scan or, in tests, from in-process
/// definitions) and never reloaded. Identifiers are kept sorted so suffix
/// lookups are deterministic.
#[derive(Debug, Default)]
pub struct SchemaRepository {
    schemas: BTreeMap<SchemaId, SchemaDocument>,
}

impl SchemaRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `root` recursively for `*.schema.json` files.
    ///
    /// Each definition is identified by its `$id` member, falling back to the
    /// file name. Files that fail to parse are skipped with a warning; the
    /// scan itself still succeeds.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let mut repository = Self::new();
        let mut files = Vec::new();
        collect_schema_files(root.as_ref(), &mut files)?;

        for path in files {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("skipping unreadable schema file {}: {}", path.display(), err);
                    continue;
                }
            };
            let definition: Value = match serde_json::from_str(&text) {
                Ok(definition) => definition,
                Err(err) => {
                    log::warn!("skipping unparseable schema file {}: {}", path.display(), err);
                    continue;
                }
            };
            let id = definition
                .get("$id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .map(str::to_string)
                });
            match id {
                Some(id) => repository.insert(SchemaId::new(id), definition),
                None => {
                    log::warn!("skipping schema file without a usable id: {}", path.display());
                }
            }
        }

        log::info!("schema repository loaded: {} definitions", repository.len());
        Ok(repository)
    }

    /// Adds a definition, replacing any previous one under the same id.
    pub fn insert(&mut self, id: SchemaId, definition: Value) {
        self.schemas.insert(
            id.clone(),
            SchemaDocument { id, definition },
        );
    }

    /// Builds a repository from in-process definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = (SchemaId, Value)>) -> Self {
        let mut repository = Self::new();
        for (id, definition) in definitions {
            repository.insert(id, definition);
        }
        repository
    }

    /// Looks up a definition by exact identifier.
    pub fn get(&self, id: &str) -> Option<&SchemaDocument> {
        self.schemas.get(&SchemaId::new(id.to_string()))
    }

    /// Finds the first definition (in sorted id order) whose identifier ends
    /// with `suffix`, compared case-insensitively.
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&SchemaDocument> {
        let needle = suffix.to_ascii_lowercase();
        self.schemas
            .values()
            .find(|doc| doc.id.as_ref().to_ascii_lowercase().ends_with(&needle))
    }

    /// Returns all identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &SchemaId> {
        self.schemas.keys()
    }

    /// Number of definitions held.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the repository holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn collect_schema_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SchemaError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_schema_files(&path, out)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(".schema.json"))
            .unwrap_or(false)
        {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_dir_prefers_dollar_id_over_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.schema.json"),
            r#"{"$id": "https://schemas.example.org/interface_record.schema.json"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.schema.json"), r#"{"required": []}"#).unwrap();

        let repository = SchemaRepository::load_dir(dir.path()).unwrap();
        assert!(repository
            .get("https://schemas.example.org/interface_record.schema.json")
            .is_some());
        assert!(repository.get("b.schema.json").is_some());
        assert!(repository.get("a.schema.json").is_none());
    }

    #[test]
    fn load_dir_skips_unparseable_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.schema.json"), "{not json").unwrap();
        fs::write(dir.path().join("ok.schema.json"), "{}").unwrap();

        let repository = SchemaRepository::load_dir(dir.path()).unwrap();
        assert_eq!(repository.len(), 1);
        assert!(repository.get("ok.schema.json").is_some());
    }

    #[test]
    fn load_dir_recurses_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("v2")).unwrap();
        fs::write(dir.path().join("v2/session_log.schema.json"), "{}").unwrap();

        let repository = SchemaRepository::load_dir(dir.path()).unwrap();
        assert!(repository.get("session_log.schema.json").is_some());
    }

    #[test]
    fn suffix_lookup_is_case_insensitive_and_sorted() {
        let repository = SchemaRepository::from_definitions([
            (SchemaId::new("z/Interface_Record.schema.json".into()), json!({})),
            (SchemaId::new("a/interface_record.schema.json".into()), json!({})),
        ]);
        let found = repository.find_by_suffix("INTERFACE_RECORD.SCHEMA.JSON").unwrap();
        assert_eq!(found.id.as_ref(), "a/interface_record.schema.json");
    }
}
