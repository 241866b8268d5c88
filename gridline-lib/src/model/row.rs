//! Row abstraction consumed by columns, engines and the controller

use std::fmt;
use std::hash::Hash;

use super::Value;

/// Trait for rows that can be displayed in a table.
///
/// A row is otherwise opaque: the table only needs a unique key and a way to
/// read a raw field by name. Columns with an accessor never call `field`.
///
/// # Example
///
/// ```
/// use gridline_lib::model::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct Report {
///     id: u32,
///     subject: String,
/// }
///
/// impl TableRow for Report {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(self.id.into()),
///             "subject" => Some(self.subject.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Return the unique key for this row.
    fn key(&self) -> Self::Key;

    /// Return the raw value stored under `name`, if any.
    fn field(&self, name: &str) -> Option<Value>;
}

impl<T: TableRow> TableRow for &T {
    type Key = T::Key;

    fn key(&self) -> Self::Key {
        (**self).key()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}
