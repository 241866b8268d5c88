//! FieldError for building records from JSON

/// Error type for turning loosely-typed JSON into [`Record`](crate::model::Record)s.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The object has no value at the configured key field.
    #[error("Key field '{field}' not found in record")]
    MissingKey { field: String },

    /// The key field holds a value that cannot identify a row.
    #[error("Key field '{field}' has unusable type {actual}")]
    InvalidKey { field: String, actual: &'static str },

    /// The JSON value is not an object.
    #[error("Expected a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },
}

impl FieldError {
    /// Creates a new missing key error.
    pub fn missing_key(field: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
        }
    }

    /// Creates a new invalid key error.
    pub fn invalid_key(field: impl Into<String>, actual: &'static str) -> Self {
        Self::InvalidKey {
            field: field.into(),
            actual,
        }
    }
}
