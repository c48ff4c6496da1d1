use thiserror::Error;

/// Errors raised while loading the schema repository.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema root directory could not be read.
    #[error("I/O error while scanning schema root: {0}")]
    Io(#[from] std::io::Error),
}
