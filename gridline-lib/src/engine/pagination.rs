//! Page windows and the pager model.

use std::collections::BTreeSet;
use std::ops::Range;

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// A clamped page and the item range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBounds {
    /// Current page, clamped to `1..=total_pages`.
    pub page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Item indices shown on `page`.
    pub range: Range<usize>,
}

/// Compute the bounds of `current_page` over `total_items`.
///
/// Out-of-range pages are clamped; a zero page size is treated as one.
pub fn page_bounds(total_items: usize, page_size: usize, current_page: usize) -> PageBounds {
    let page_size = page_size.max(1);
    let total_pages = total_pages(total_items, page_size);
    let page = current_page.clamp(1, total_pages);
    let start = ((page - 1) * page_size).min(total_items);
    let end = (page * page_size).min(total_items);
    PageBounds {
        page,
        total_pages,
        range: start..end,
    }
}

/// The rows of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub rows: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

/// Slice `rows` down to `current_page`.
pub fn paginate<T>(rows: &[T], page_size: usize, current_page: usize) -> PageWindow<'_, T> {
    let bounds = page_bounds(rows.len(), page_size, current_page);
    PageWindow {
        rows: &rows[bounds.range],
        page: bounds.page,
        total_pages: bounds.total_pages,
    }
}

// =============================================================================
// Pager
// =============================================================================

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Layout model for a pagination control.
///
/// Shows the first and last page, the current page and its immediate
/// neighbors, and an ellipsis wherever pages are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total: usize,
    items: Vec<PageItem>,
}

impl Pager {
    /// Build the pager for `current` of `total` pages.
    ///
    /// `total` is at least one and `current` is clamped into range.
    pub fn new(current: usize, total: usize) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);

        let mut shown = BTreeSet::from([1, total, current]);
        if current > 1 {
            shown.insert(current - 1);
        }
        if current < total {
            shown.insert(current + 1);
        }

        let mut items = Vec::with_capacity(shown.len() * 2);
        let mut previous = 0;
        for number in shown {
            if previous != 0 && number > previous + 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number,
                current: number == current,
            });
            previous = number;
        }

        Self {
            current,
            total,
            items,
        }
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether the "previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<usize> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.current + 1)
    }
}
