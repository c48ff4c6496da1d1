//! Schemas command implementation.

use std::path::Path;

use neurite_schema::SchemaRepository;

pub fn run(schema_dir: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let repository = SchemaRepository::load_dir(schema_dir)
        .map_err(|e| format!("Failed to load schema directory {}: {}", schema_dir.display(), e))?;

    if json_output {
        let ids: Vec<&str> = repository.ids().map(|id| id.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&ids)?);
    } else {
        for id in repository.ids() {
            println!("{}", id);
        }
        println!("{} schema definition(s)", repository.len());
    }
    Ok(())
}
