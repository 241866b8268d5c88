use std::collections::HashSet;

use super::Column;
use crate::error::TableError;

/// Check that every column has a non-empty key and that keys are unique.
pub fn validate_columns<R>(columns: &[Column<R>]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.key().is_empty() {
            return Err(TableError::MissingColumnKey { index });
        }
        if !seen.insert(column.key()) {
            return Err(TableError::DuplicateColumnKey {
                key: column.key().to_string(),
            });
        }
    }
    Ok(())
}

/// Find a column by key.
pub fn find_column<'a, R>(columns: &'a [Column<R>], key: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|column| column.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_valid_columns() {
        let columns: Vec<Column<Record>> = vec![Column::new("a", "A"), Column::new("b", "B")];
        assert!(validate_columns(&columns).is_ok());
        assert_eq!(find_column(&columns, "b").map(|c| c.title()), Some("B"));
        assert!(find_column(&columns, "c").is_none());
    }

    #[test]
    fn test_empty_key_rejected() {
        let columns: Vec<Column<Record>> = vec![Column::new("a", "A"), Column::new("", "B")];
        assert!(matches!(
            validate_columns(&columns),
            Err(TableError::MissingColumnKey { index: 1 })
        ));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let columns: Vec<Column<Record>> = vec![Column::new("a", "A"), Column::new("a", "Again")];
        assert!(matches!(
            validate_columns(&columns),
            Err(TableError::DuplicateColumnKey { key }) if key == "a"
        ));
    }
}
