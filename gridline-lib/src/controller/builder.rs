use std::cell::{Cell, RefCell};

use super::TableController;
use super::authority::{ConcernState, PageCallback, SearchCallback, SelectCallback, SortCallback};
use crate::column::{Column, validate_columns};
use crate::config::TableConfig;
use crate::engine::{SelectionSet, SortState};
use crate::error::{CallbackError, TableError};
use crate::model::TableRow;

/// Builder for [`TableController`].
///
/// Supplying a callback puts the matching concern in controlled mode; leaving
/// it out lets the controller manage that concern itself.
///
/// # Example
///
/// ```
/// use gridline_lib::column::Column;
/// use gridline_lib::controller::TableController;
/// use gridline_lib::model::Record;
///
/// let rows = vec![Record::new(1).set("name", "Ann"), Record::new(2).set("name", "Bo")];
/// let table = TableController::builder(vec![Column::new("name", "Name")])
///     .rows(rows)
///     .page_size(1)
///     .on_page_change(|page| {
///         println!("load page {page}");
///         Ok(())
///     })
///     .build()
///     .unwrap();
/// assert_eq!(table.view().len(), 2);
/// ```
pub struct TableControllerBuilder<R: TableRow> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    config: TableConfig,
    selected: Vec<R::Key>,
    total_items: Option<usize>,
    on_sort: Option<SortCallback>,
    on_search: Option<SearchCallback>,
    on_page_change: Option<PageCallback>,
    on_row_select: Option<SelectCallback<R::Key>>,
}

impl<R: TableRow> TableControllerBuilder<R> {
    pub(super) fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            config: TableConfig::default(),
            selected: Vec::new(),
            total_items: None,
            on_sort: None,
            on_search: None,
            on_page_change: None,
            on_row_select: None,
        }
    }

    /// The dataset, or the caller's current page when pagination is controlled.
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Initially selected keys.
    pub fn selected(mut self, keys: impl IntoIterator<Item = R::Key>) -> Self {
        self.selected = keys.into_iter().collect();
        self
    }

    /// Total row count across all pages, for controlled pagination.
    pub fn total_items(mut self, total: usize) -> Self {
        self.total_items = Some(total);
        self
    }

    /// Report sort changes to the caller, who supplies sorted rows.
    pub fn on_sort(
        mut self,
        f: impl FnMut(&SortState) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_sort = Some(Box::new(f));
        self
    }

    /// Report search terms to the caller, who supplies filtered rows.
    pub fn on_search(mut self, f: impl FnMut(&str) -> Result<(), CallbackError> + 'static) -> Self {
        self.on_search = Some(Box::new(f));
        self
    }

    /// Report page requests to the caller, who supplies the page's rows.
    pub fn on_page_change(
        mut self,
        f: impl FnMut(usize) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_page_change = Some(Box::new(f));
        self
    }

    /// Report selection changes to the caller, who owns the selection.
    pub fn on_row_select(
        mut self,
        f: impl FnMut(&SelectionSet<R::Key>) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_row_select = Some(Box::new(f));
        self
    }

    /// Validate the configuration and build the controller.
    pub fn build(self) -> Result<TableController<R>, TableError> {
        validate_columns(&self.columns)?;
        self.config.validate()?;
        let index = super::build_index(&self.rows)?;

        log::debug!(
            "Building table: {} columns, {} rows, page size {}",
            self.columns.len(),
            self.rows.len(),
            self.config.page_size
        );

        Ok(TableController {
            columns: self.columns,
            rows: self.rows,
            index,
            page_size: self.config.page_size,
            total_items: self.total_items,
            sort: ConcernState::new(self.config.sort_state(), self.on_sort),
            search: ConcernState::new(self.config.initial_search.clone(), self.on_search),
            pagination: ConcernState::new(self.config.initial_page, self.on_page_change),
            selection: ConcernState::new(
                self.selected.into_iter().collect(),
                self.on_row_select,
            ),
            data_generation: 0,
            columns_generation: 0,
            memo: RefCell::new(None),
            recomputations: Cell::new(0),
        })
    }
}
