//! Controller error types

use std::fmt;

/// Error produced by a caller-supplied change callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The four independently controlled concerns of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concern {
    Sort,
    Search,
    Pagination,
    Selection,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Concern::Sort => "sort",
            Concern::Search => "search",
            Concern::Pagination => "pagination",
            Concern::Selection => "selection",
        };
        f.write_str(name)
    }
}

/// Errors raised while building or driving a
/// [`TableController`](crate::controller::TableController).
///
/// Configuration variants are programmer errors and are reported at
/// construction time. `Callback` carries whatever the caller's change handler
/// returned; the controller never swallows it.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A column descriptor has an empty key.
    #[error("Column at position {index} has no key")]
    MissingColumnKey { index: usize },

    /// Two column descriptors share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumnKey { key: String },

    /// Two rows in the dataset share a key.
    #[error("Duplicate row key '{key}'")]
    DuplicateRowKey { key: String },

    /// An interaction named a column that is not configured.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// An interaction named a row key that is not in the dataset.
    #[error("Unknown row key '{key}'")]
    UnknownRow { key: String },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::error::ConfigError),

    /// A caller-supplied change callback failed.
    #[error("{concern} callback failed: {source}")]
    Callback {
        concern: Concern,
        #[source]
        source: CallbackError,
    },
}

impl TableError {
    /// Creates an unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates an unknown row error.
    pub fn unknown_row(key: &impl fmt::Display) -> Self {
        Self::UnknownRow {
            key: key.to_string(),
        }
    }

    /// Creates a duplicate row error.
    pub fn duplicate_row(key: &impl fmt::Display) -> Self {
        Self::DuplicateRowKey {
            key: key.to_string(),
        }
    }

    /// Wraps a callback failure for the given concern.
    pub fn callback(concern: Concern, source: CallbackError) -> Self {
        Self::Callback { concern, source }
    }
}
