//! Schema repository, classification, and validation contracts.
//!
//! The repository is a read-only facade over schema definitions supplied by
//! an external schema project; it is discovered once at startup and never
//! reloaded. Classification resolves a document to a repository schema using
//! an explicit marker, a type suffix match, or an ordered heuristic rule
//! table. Validation is a trait contract so deployments can plug in a full
//! JSON Schema engine; the shipped validator covers the structural subset.

#![deny(missing_docs)]

/// Document classification against the repository.
pub mod classifier;
/// Error types for schema operations.
pub mod errors;
/// Read-only schema repository.
pub mod repository;
/// Validator contract and the shipped structural validator.
pub mod validator;

pub use classifier::{classify, ClassificationRule, CLASSIFICATION_RULES};
pub use errors::SchemaError;
pub use repository::{SchemaDocument, SchemaRepository};
pub use validator::{FieldConstraintValidator, SchemaValidator, ValidationFailure, Violation};
