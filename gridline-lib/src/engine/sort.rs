//! Column sorting.
//!
//! Sorting is stable and works on any item type through a row projection, so
//! the controller can sort dataset indices while callers sort row references.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::{Column, find_column};
use crate::model::{TableRow, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9), nulls last.
    Asc,
    /// Descending order (Z-A, 9-0), nulls first.
    Desc,
}

/// Current sort of a table.
///
/// An unsorted table has neither a key nor a direction, so a direction can
/// never exist without a column to apply it to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted { key: String, direction: Direction },
}

impl SortState {
    /// Ascending sort on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        SortState::Sorted {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        SortState::Sorted {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// The sorted column key, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { key, .. } => Some(key),
        }
    }

    /// The sort direction, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { direction, .. } => Some(*direction),
        }
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self, SortState::Sorted { .. })
    }

    /// Direction shown in the header of column `key`.
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        match self {
            SortState::Sorted { key: k, direction } if k == key => Some(*direction),
            _ => None,
        }
    }

    /// State after the header of column `key` is clicked.
    ///
    /// Cycles ascending, descending, unsorted. Clicking a different column
    /// always starts at ascending.
    pub fn next(&self, key: &str) -> SortState {
        match self.direction_for(key) {
            None => SortState::asc(key),
            Some(Direction::Asc) => SortState::desc(key),
            Some(Direction::Desc) => SortState::Unsorted,
        }
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Type class of a value. Values of different classes order by class.
fn class_rank(value: &Value) -> u8 {
    match value {
        Value::Int(_) | Value::Float(_) => 0,
        Value::DateTime(_) => 1,
        Value::Bool(_) => 2,
        Value::String(_) | Value::Guid(_) | Value::Json(_) => 3,
        Value::Null => 4,
    }
}

/// NaN sorts after every other number; zeros of either sign are equal.
fn compare_floats(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= i64::MAX as f64 {
        return Ordering::Less;
    }
    if f < i64::MIN as f64 {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        other => other,
    }
}

/// Ascending comparison of two column values.
///
/// This is a total order, so any column can be sorted. Values are first
/// grouped by type class: numbers, then dates, then booleans, then text, then
/// nulls. Numbers compare numerically (integers against floats exactly),
/// dates chronologically, text with [`locale_cmp`]. Mixed text-like types
/// (strings, GUIDs, JSON) compare by display text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => locale_cmp(x, y),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => class_rank(a)
            .cmp(&class_rank(b))
            .then_with(|| locale_cmp(&a.to_string(), &b.to_string())),
    }
}

/// Case-insensitive ordering with lowercase before uppercase on ties.
///
/// Approximates a root-locale collation: "apple" < "Banana" < "banana" < "cherry".
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
    }
    a.len().cmp(&b.len())
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort row references by the current sort state.
///
/// Returns the input order unchanged when unsorted.
pub fn sort<'a, R: TableRow>(
    rows: Vec<&'a R>,
    columns: &[Column<R>],
    state: &SortState,
) -> Vec<&'a R> {
    sort_by(rows, |row| *row, columns, state)
}

/// Sort arbitrary items, reading each item's row through `row_of`.
///
/// Each row's sort value is resolved once. When no column matches the sort
/// key the raw field of that name is used.
pub fn sort_by<'r, T, R: TableRow + 'r>(
    items: Vec<T>,
    row_of: impl Fn(&T) -> &'r R,
    columns: &[Column<R>],
    state: &SortState,
) -> Vec<T> {
    let SortState::Sorted { key, direction } = state else {
        return items;
    };

    let column = find_column(columns, key);
    if column.is_none() {
        log::warn!("Sort key '{}' matches no column, using raw field", key);
    }

    let mut keyed: Vec<(Value, T)> = items
        .into_iter()
        .map(|item| {
            let row = row_of(&item);
            let value = match column {
                Some(column) => column.value_of(row),
                None => row.field(key).unwrap_or_default(),
            };
            (value, item)
        })
        .collect();

    // slice::sort_by is stable, so ties keep input order in both directions
    match direction {
        Direction::Asc => keyed.sort_by(|a, b| compare_values(&a.0, &b.0)),
        Direction::Desc => keyed.sort_by(|a, b| compare_values(&b.0, &a.0)),
    }

    keyed.into_iter().map(|(_, item)| item).collect()
}
