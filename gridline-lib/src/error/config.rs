//! Configuration error types

/// Error returned when a [`TableConfig`](crate::config::TableConfig) is invalid
/// or cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Page size must be a positive integer.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// Page numbers are 1-based.
    #[error("Page numbers start at 1, got 0")]
    ZeroPage,

    /// The configuration document is not valid JSON for this schema.
    #[error("Invalid table configuration: {0}")]
    Json(#[from] serde_json::Error),
}
