//! Pure table engines: sorting, filtering, selection and pagination.

pub mod filter;
pub mod pagination;
pub mod selection;
pub mod sort;

pub use filter::{filter, filter_by};
pub use pagination::{PageBounds, PageItem, PageWindow, Pager, page_bounds, paginate, total_pages};
pub use selection::{CheckState, SelectionSet};
pub use sort::{Direction, SortState, sort, sort_by};
