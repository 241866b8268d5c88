//! Column descriptors.
//!
//! A [`Column`] describes how one logical field of a row is extracted,
//! displayed, sorted and searched. The value source and the renderer are
//! separate typed slots, so cell content always resolves in the same order:
//! renderer, then accessor, then the raw field named by the column key.

mod cell;
mod validate;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use cell::Cell;
pub use validate::{find_column, validate_columns};

use crate::model::{TableRow, Value};

/// Computes a row's value for a column.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Produces display text for a row; receives the row's index on the page.
pub type Renderer<R> = Arc<dyn Fn(&R, usize) -> String + Send + Sync>;

// =============================================================================
// Layout hints
// =============================================================================

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column width specification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Size to content.
    #[default]
    Auto,
}

// =============================================================================
// Value source
// =============================================================================

/// Where a column reads its value from.
pub enum ValueSource<R> {
    /// The raw row field named by the column key.
    Field,
    /// A derived value.
    Accessor(Accessor<R>),
}

impl<R> Clone for ValueSource<R> {
    fn clone(&self) -> Self {
        match self {
            ValueSource::Field => ValueSource::Field,
            ValueSource::Accessor(f) => ValueSource::Accessor(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for ValueSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Field => f.write_str("Field"),
            ValueSource::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

// =============================================================================
// Column
// =============================================================================

/// A table column definition.
///
/// # Example
///
/// ```
/// use gridline_lib::column::{Alignment, Column};
/// use gridline_lib::model::{Record, Value};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("id", "#").align(Alignment::Right).searchable(false),
///     Column::new("subject", "Subject"),
///     Column::new("status", "Status")
///         .accessor(|r: &Record| r.get("state").cloned().unwrap_or(Value::Null))
///         .render(|r: &Record, _| format!("[{}]", r.get("state").cloned().unwrap_or_default())),
/// ];
/// assert_eq!(columns[1].key(), "subject");
/// ```
pub struct Column<R> {
    key: String,
    title: String,
    source: ValueSource<R>,
    renderer: Option<Renderer<R>>,
    sortable: bool,
    searchable: bool,
    align: Alignment,
    width: Option<ColumnWidth>,
}

impl<R> Column<R> {
    /// Create a new column with the given key and title.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            source: ValueSource::Field,
            renderer: None,
            sortable: true,
            searchable: true,
            align: Alignment::default(),
            width: None,
        }
    }

    /// Derive the column value instead of reading the raw field.
    pub fn accessor(mut self, f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        self.source = ValueSource::Accessor(Arc::new(f));
        self
    }

    /// Override the displayed cell content.
    pub fn render(mut self, f: impl Fn(&R, usize) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Enable or disable sorting by this column. Default: enabled.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Include or exclude this column from search. Default: included.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Set the cell alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &ValueSource<R> {
        &self.source
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn width_hint(&self) -> Option<&ColumnWidth> {
        self.width.as_ref()
    }
}

impl<R: TableRow> Column<R> {
    /// Resolve this column's value for a row: accessor if present, else the
    /// raw field. Missing fields resolve to [`Value::Null`].
    pub fn value_of(&self, row: &R) -> Value {
        match &self.source {
            ValueSource::Accessor(f) => f(row),
            ValueSource::Field => row.field(&self.key).unwrap_or_default(),
        }
    }

    /// Resolve the cell content for a row at `index` on the current page.
    pub fn cell(&self, row: &R, index: usize) -> Cell {
        match &self.renderer {
            Some(render) => Cell::Rendered(render(row, index)),
            None => Cell::Value(self.value_of(row)),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            source: self.source.clone(),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            align: self.align,
            width: self.width.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("source", &self.source)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("align", &self.align)
            .field("width", &self.width)
            .finish()
    }
}
