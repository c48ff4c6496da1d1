use thiserror::Error;

/// Validation failures raised by canonical newtypes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A value did not match the required pattern for its field.
    #[error("{field} does not match required pattern: {value}")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
