//! Table configuration

use serde::{Deserialize, Serialize};

use crate::engine::{Direction, SortState};
use crate::error::ConfigError;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Initial sort as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: Direction,
}

impl From<SortConfig> for SortState {
    fn from(config: SortConfig) -> Self {
        SortState::Sorted {
            key: config.key,
            direction: config.direction,
        }
    }
}

/// Initial state of a table controller.
///
/// # Example
///
/// ```
/// use gridline_lib::config::TableConfig;
/// use gridline_lib::engine::Direction;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_sort("created", Direction::Desc);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page shown first (1-based).
    ///
    /// Default: 1
    pub initial_page: usize,

    /// Sort applied before the first header click.
    ///
    /// Default: unsorted
    pub initial_sort: Option<SortConfig>,

    /// Search term applied before the first keystroke.
    ///
    /// Default: empty (no filter)
    pub initial_search: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_page: 1,
            initial_sort: None,
            initial_search: String::new(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial page.
    pub fn with_initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.initial_sort = Some(SortConfig {
            key: key.into(),
            direction,
        });
        self
    }

    /// Sets the initial search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.initial_search = term.into();
        self
    }

    /// Initial sort as a [`SortState`].
    pub fn sort_state(&self) -> SortState {
        self.initial_sort
            .clone()
            .map(SortState::from)
            .unwrap_or_default()
    }

    /// Checks the invariants the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.initial_page == 0 {
            return Err(ConfigError::ZeroPage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.initial_page, 1);
        assert_eq!(config.sort_state(), SortState::Unsorted);
        assert!(config.initial_search.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = TableConfig::from_json(
            r#"{"page_size": 25, "initial_sort": {"key": "name", "direction": "desc"}}"#,
        )
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.initial_page, 1);
        assert_eq!(config.sort_state(), SortState::desc("name"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = TableConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPageSize));
    }

    #[test]
    fn test_zero_page_rejected() {
        let config = TableConfig::default().with_initial_page(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPage)));
    }

    #[test]
    fn test_bad_json() {
        let err = TableConfig::from_json(r#"{"page_size": "ten"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
