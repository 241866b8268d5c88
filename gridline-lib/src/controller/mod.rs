//! Table view controller.
//!
//! [`TableController`] owns the sort, search, pagination and selection state
//! of one table and derives the rows to display from them. Each concern is
//! independently controlled or uncontrolled:
//!
//! | Concern    | Controlled (callback supplied)                      | Uncontrolled                 |
//! |------------|-----------------------------------------------------|------------------------------|
//! | Sort       | header indicator tracked, rows left in given order  | rows sorted locally          |
//! | Search     | term tracked, rows left unfiltered                  | rows filtered locally        |
//! | Pagination | page requests reported, rows shown as given         | rows sliced to the page      |
//! | Selection  | new selection reported, caller's set rendered       | selection kept locally       |
//!
//! When everything is local the pipeline is filter, then sort, then paginate.

mod authority;
mod builder;
mod view;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub use authority::{Authority, Mode, PageCallback, SearchCallback, SelectCallback, SortCallback};
pub use builder::TableControllerBuilder;
pub use view::{TableView, ViewRow};

use authority::ConcernState;
use view::{MemoKey, Processed};

use crate::column::{Column, find_column, validate_columns};
use crate::engine::{SelectionSet, SortState, filter_by, page_bounds, sort_by, total_pages};
use crate::error::{Concern, ConfigError, TableError};
use crate::model::TableRow;

/// Index of row keys to dataset positions, rejecting duplicates.
fn build_index<R: TableRow>(rows: &[R]) -> Result<HashMap<R::Key, usize>, TableError> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        let key = row.key();
        if index.contains_key(&key) {
            return Err(TableError::duplicate_row(&key));
        }
        index.insert(key, position);
    }
    Ok(index)
}

/// Sort, search, pagination and selection state for one table.
///
/// Built with [`TableController::builder`]. State changes only through the
/// interaction handlers (`click_header`, `search`, `go_to_page`, `toggle_row`,
/// `toggle_all`) and the `sync_*` methods a controlling caller uses to hand
/// back its state.
#[derive(Debug)]
pub struct TableController<R: TableRow> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    index: HashMap<R::Key, usize>,
    page_size: usize,
    /// Caller-reported row count for controlled pagination.
    total_items: Option<usize>,
    sort: ConcernState<SortState, SortCallback>,
    search: ConcernState<String, SearchCallback>,
    pagination: ConcernState<usize, PageCallback>,
    selection: ConcernState<SelectionSet<R::Key>, SelectCallback<R::Key>>,
    data_generation: u64,
    columns_generation: u64,
    memo: RefCell<Option<(MemoKey, Rc<Processed>)>>,
    recomputations: Cell<u64>,
}

impl<R: TableRow> TableController<R> {
    /// Start building a controller for the given columns.
    pub fn builder(columns: Vec<Column<R>>) -> TableControllerBuilder<R> {
        TableControllerBuilder::new(columns)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The full dataset as supplied, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Find a row by key.
    pub fn row(&self, key: &R::Key) -> Option<&R> {
        self.index.get(key).map(|&position| &self.rows[position])
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort.value
    }

    pub fn search_term(&self) -> &str {
        &self.search.value
    }

    /// The stored page. In uncontrolled mode the displayed page may be lower
    /// if the data shrank; see [`TableView::page`].
    pub fn current_page(&self) -> usize {
        self.pagination.value
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The selection used for rendering.
    pub fn selection(&self) -> &SelectionSet<R::Key> {
        &self.selection.value
    }

    /// Rows whose keys are selected, in dataset order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|row| self.selection.value.contains(&row.key()))
            .collect()
    }

    /// Who owns the state of `concern`.
    pub fn mode(&self, concern: Concern) -> Mode {
        match concern {
            Concern::Sort => self.sort.mode(),
            Concern::Search => self.search.mode(),
            Concern::Pagination => self.pagination.mode(),
            Concern::Selection => self.selection.mode(),
        }
    }

    /// Number of times the displayed rows were recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputations.get()
    }

    // -------------------------------------------------------------------------
    // Interaction handlers
    // -------------------------------------------------------------------------

    /// Handle a click on the header of column `key`.
    ///
    /// Non-sortable columns ignore clicks. The header indicator is tracked in
    /// both modes; only uncontrolled sorting reorders rows.
    pub fn click_header(&mut self, key: &str) -> Result<(), TableError> {
        let column = find_column(&self.columns, key).ok_or_else(|| TableError::unknown_column(key))?;
        if !column.is_sortable() {
            log::debug!("Ignoring header click on unsortable column '{}'", key);
            return Ok(());
        }

        let next = self.sort.value.next(key);
        log::debug!("Sort {:?} -> {:?}", self.sort.value, next);

        if let Authority::Controlled(on_sort) = &mut self.sort.authority {
            on_sort(&next).map_err(|e| TableError::callback(Concern::Sort, e))?;
        }
        self.sort.value = next;
        Ok(())
    }

    /// Handle a change of the search box.
    ///
    /// When pagination is uncontrolled a changed term returns to page 1.
    pub fn search(&mut self, term: impl Into<String>) -> Result<(), TableError> {
        let term = term.into();
        log::debug!("Search term '{}'", term);

        if let Authority::Controlled(on_search) = &mut self.search.authority {
            on_search(&term).map_err(|e| TableError::callback(Concern::Search, e))?;
        }

        if term != self.search.value {
            self.search.value = term;
            if !self.pagination.authority.is_controlled() {
                self.pagination.value = 1;
            }
        }
        Ok(())
    }

    /// Handle a page request.
    ///
    /// Uncontrolled pages are clamped to the available range. Controlled
    /// requests are passed through untouched; the caller answers with
    /// [`sync_page`](Self::sync_page) and new rows.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), TableError> {
        if let Authority::Controlled(on_page_change) = &mut self.pagination.authority {
            log::debug!("Requesting page {}", page);
            return on_page_change(page).map_err(|e| TableError::callback(Concern::Pagination, e));
        }

        let total = self.processed().total_pages;
        let clamped = page.clamp(1, total);
        if clamped != page {
            log::debug!("Clamped page {} to {}", page, clamped);
        }
        self.pagination.value = clamped;
        Ok(())
    }

    /// Change the number of rows per page and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize.into());
        }
        self.page_size = page_size;
        match &mut self.pagination.authority {
            Authority::Controlled(on_page_change) => {
                on_page_change(1).map_err(|e| TableError::callback(Concern::Pagination, e))?;
            }
            Authority::Uncontrolled => self.pagination.value = 1,
        }
        Ok(())
    }

    /// Check or uncheck one row.
    pub fn toggle_row(&mut self, key: R::Key, checked: bool) -> Result<(), TableError> {
        if !self.index.contains_key(&key) {
            return Err(TableError::unknown_row(&key));
        }
        log::debug!("Toggle row {} -> {}", key, checked);
        self.update_selection(|selection| {
            selection.toggle_row(key, checked);
        })
    }

    /// Check or uncheck every displayed row. Rows on other pages keep their
    /// selection.
    pub fn toggle_all(&mut self, checked: bool) -> Result<(), TableError> {
        let visible = self.visible_keys();
        log::debug!("Toggle {} visible rows -> {}", visible.len(), checked);
        self.update_selection(|selection| {
            selection.toggle_all(&visible, checked);
        })
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> Result<(), TableError> {
        self.update_selection(|selection| {
            selection.clear();
        })
    }

    /// Drop selected keys that are no longer in the dataset.
    ///
    /// Stale keys are never removed automatically. Returns the removed keys.
    pub fn prune_selection(&mut self) -> Result<Vec<R::Key>, TableError> {
        let index = &self.index;
        let mut next = self.selection.value.clone();
        let removed = next.retain(|key| index.contains_key(key));
        if removed.is_empty() {
            return Ok(removed);
        }
        log::debug!("Pruning {} stale selected keys", removed.len());
        self.update_selection(move |selection| *selection = next)?;
        Ok(removed)
    }

    fn update_selection(
        &mut self,
        change: impl FnOnce(&mut SelectionSet<R::Key>),
    ) -> Result<(), TableError> {
        match &mut self.selection.authority {
            Authority::Controlled(on_row_select) => {
                let mut next = self.selection.value.clone();
                change(&mut next);
                on_row_select(&next).map_err(|e| TableError::callback(Concern::Selection, e))
            }
            Authority::Uncontrolled => {
                change(&mut self.selection.value);
                Ok(())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Caller-side updates
    // -------------------------------------------------------------------------

    /// Replace the dataset. Selection is kept as-is.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), TableError> {
        self.index = build_index(&rows)?;
        self.rows = rows;
        self.data_generation += 1;
        log::debug!("Dataset replaced: {} rows", self.rows.len());
        Ok(())
    }

    /// Replace the column descriptors.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<(), TableError> {
        validate_columns(&columns)?;
        self.columns = columns;
        self.columns_generation += 1;
        Ok(())
    }

    /// Overwrite the sort indicator without reporting it, e.g. after the
    /// caller refetched data sorted differently.
    pub fn sync_sort(&mut self, sort: SortState) {
        self.sort.value = sort;
    }

    /// Overwrite the search term without reporting it.
    pub fn sync_search(&mut self, term: impl Into<String>) {
        self.search.value = term.into();
    }

    /// Set the page the caller is showing. Not clamped.
    pub fn sync_page(&mut self, page: usize) {
        self.pagination.value = page;
    }

    /// Set the caller's total row count, or `None` to count the given rows.
    pub fn sync_total_items(&mut self, total: Option<usize>) {
        self.total_items = total;
    }

    /// Overwrite the selection without reporting it.
    pub fn sync_selection(&mut self, keys: impl IntoIterator<Item = R::Key>) {
        self.selection.value = keys.into_iter().collect();
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Derive the rows to display and the affordance flags.
    pub fn view(&self) -> TableView<'_, R> {
        let processed = self.processed();
        let rows: Vec<ViewRow<'_, R>> = processed
            .indices
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let row = &self.rows[position];
                let key = row.key();
                ViewRow {
                    index,
                    selected: self.selection.value.contains(&key),
                    key,
                    row,
                }
            })
            .collect();
        let keys: Vec<R::Key> = rows.iter().map(|row| row.key.clone()).collect();

        TableView {
            columns: &self.columns,
            check_state: self.selection.value.check_state(&keys),
            rows,
            sort: &self.sort.value,
            search: &self.search.value,
            page: processed.page,
            total_pages: processed.total_pages,
            total_items: processed.total_items,
        }
    }

    /// Keys of the rows currently displayed.
    pub fn visible_keys(&self) -> Vec<R::Key> {
        self.processed()
            .indices
            .iter()
            .map(|&position| self.rows[position].key())
            .collect()
    }

    fn memo_key(&self) -> MemoKey {
        let paginate_locally = !self.pagination.authority.is_controlled();
        MemoKey {
            data_generation: self.data_generation,
            columns_generation: self.columns_generation,
            sort: (!self.sort.authority.is_controlled()).then(|| self.sort.value.clone()),
            search: (!self.search.authority.is_controlled()).then(|| self.search.value.clone()),
            page: self.pagination.value,
            page_size: self.page_size,
            total_items: if paginate_locally { None } else { self.total_items },
            paginate_locally,
        }
    }

    fn processed(&self) -> Rc<Processed> {
        let key = self.memo_key();
        if let Some((cached_key, processed)) = self.memo.borrow().as_ref()
            && *cached_key == key
        {
            log::trace!("Table view cache hit");
            return Rc::clone(processed);
        }

        let processed = Rc::new(self.compute(&key));
        self.recomputations.set(self.recomputations.get() + 1);
        *self.memo.borrow_mut() = Some((key, Rc::clone(&processed)));
        processed
    }

    fn compute(&self, key: &MemoKey) -> Processed {
        let rows = &self.rows;
        let mut indices: Vec<usize> = (0..rows.len()).collect();

        if let Some(term) = &key.search {
            indices = filter_by(indices, |i: &usize| &rows[*i], &self.columns, term);
        }
        if let Some(sort) = &key.sort {
            indices = sort_by(indices, |i: &usize| &rows[*i], &self.columns, sort);
        }

        log::trace!(
            "Recomputed table view: {} of {} rows match",
            indices.len(),
            rows.len()
        );

        if key.paginate_locally {
            let bounds = page_bounds(indices.len(), key.page_size, key.page);
            Processed {
                total_items: indices.len(),
                indices: indices[bounds.range].to_vec(),
                page: bounds.page,
                total_pages: bounds.total_pages,
            }
        } else {
            let total_items = key.total_items.unwrap_or(indices.len());
            Processed {
                total_pages: total_pages(total_items, key.page_size),
                total_items,
                indices,
                page: key.page,
            }
        }
    }
}
