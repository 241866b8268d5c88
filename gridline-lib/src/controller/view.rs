//! Derived render view.

use crate::column::{Cell, Column};
use crate::engine::{CheckState, Direction, Pager, SortState};
use crate::model::TableRow;

/// Inputs the derived rows depend on. Equal keys mean the cached rows are
/// still valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MemoKey {
    pub data_generation: u64,
    pub columns_generation: u64,
    /// Present only when sorting locally.
    pub sort: Option<SortState>,
    /// Present only when filtering locally.
    pub search: Option<String>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: Option<usize>,
    pub paginate_locally: bool,
}

/// Rows to display, as dataset indices, plus the page they fall on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Processed {
    pub indices: Vec<usize>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// One displayed row.
#[derive(Debug)]
pub struct ViewRow<'a, R: TableRow> {
    /// Position on the current page.
    pub index: usize,
    pub key: R::Key,
    pub row: &'a R,
    pub selected: bool,
}

impl<'a, R: TableRow> ViewRow<'a, R> {
    /// Cell content for every column, in column order.
    pub fn cells(&self, columns: &[Column<R>]) -> Vec<Cell> {
        columns
            .iter()
            .map(|column| column.cell(self.row, self.index))
            .collect()
    }
}

/// Everything a render layer needs to draw the table.
///
/// The view borrows from the controller; take a new one after every
/// interaction.
#[derive(Debug)]
pub struct TableView<'a, R: TableRow> {
    pub(super) columns: &'a [Column<R>],
    pub(super) rows: Vec<ViewRow<'a, R>>,
    pub(super) sort: &'a SortState,
    pub(super) search: &'a str,
    pub(super) page: usize,
    pub(super) total_pages: usize,
    pub(super) total_items: usize,
    pub(super) check_state: CheckState,
}

impl<'a, R: TableRow> TableView<'a, R> {
    pub fn columns(&self) -> &'a [Column<R>] {
        self.columns
    }

    pub fn rows(&self) -> &[ViewRow<'a, R>] {
        &self.rows
    }

    /// Keys of the displayed rows, in display order.
    pub fn keys(&self) -> Vec<R::Key> {
        self.rows.iter().map(|row| row.key.clone()).collect()
    }

    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cell content of the row at `position` for every column.
    pub fn cells(&self, position: usize) -> Option<Vec<Cell>> {
        self.rows.get(position).map(|row| row.cells(self.columns))
    }

    pub fn sort(&self) -> &SortState {
        self.sort
    }

    /// Sort indicator for a column header.
    pub fn sort_indicator(&self, key: &str) -> Option<Direction> {
        self.sort.direction_for(key)
    }

    pub fn search(&self) -> &str {
        self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of rows across all pages.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Pagination control model for this view.
    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.total_pages)
    }

    /// Every displayed row is selected (and there is at least one).
    pub fn all_selected(&self) -> bool {
        self.check_state == CheckState::Checked
    }

    /// Some, but not all, displayed rows are selected.
    pub fn some_selected(&self) -> bool {
        self.check_state == CheckState::Indeterminate
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }
}
