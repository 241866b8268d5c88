use std::fmt;

use crate::model::Value;

/// Resolved content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Output of the column's renderer.
    Rendered(String),
    /// The column value, to be displayed as-is.
    Value(Value),
}

impl Cell {
    /// Returns the underlying value when no renderer was involved.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Rendered(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Rendered(text) => f.write_str(text),
            Cell::Value(value) => write!(f, "{}", value),
        }
    }
}
