//! Navigation metadata for a page
//!
//! A pure function of `(total_docs, limit, page)`:
//!
//! - `total_pages = ceil(total_docs / limit)`, or `None` when `limit == 0`
//! - `has_prev_page = page > 1`, and `page <= total_pages` when that is known
//! - `has_next_page = page < total_pages`
//! - `paging_counter = (page - 1) * limit + 1`, whether or not documents
//!   exist at that position
//!
//! Arithmetic saturates; no input can make this panic.

use serde::Serialize;

/// Metadata describing a page's position in the full result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total_docs: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: Option<u64>,
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

impl PageMetadata {
    /// Computes metadata for a 1-indexed page. A page of 0 is treated as 1.
    pub fn compute(total_docs: u64, limit: u64, page: u64) -> Self {
        let page = page.max(1);

        let total_pages = if limit > 0 {
            Some(total_docs.div_ceil(limit))
        } else {
            None
        };

        let has_prev_page = page > 1 && total_pages.map_or(true, |pages| page <= pages);
        let has_next_page = total_pages.is_some_and(|pages| page < pages);

        Self {
            total_docs,
            limit,
            page,
            total_pages,
            paging_counter: (page - 1).saturating_mul(limit).saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page.saturating_add(1)),
        }
    }

    /// Metadata for pagination-disabled mode: page 1 of whatever was fetched.
    ///
    /// The limit is the total, or the fetch cap when that is smaller, so a
    /// capped fetch still reports the pages it left behind. An empty result
    /// set reports a zero limit and no page count.
    pub fn single_page(total_docs: u64, cap: Option<u64>) -> Self {
        let limit = cap.map_or(total_docs, |cap| total_docs.min(cap));
        Self::compute(total_docs, limit, 1)
    }

    /// Marks page 1 as having a previous page.
    ///
    /// Used when a caller-supplied offset starts partway into the first
    /// page: the documents before the offset are reachable as page 1.
    pub fn with_leading_offset(mut self) -> Self {
        if self.page == 1 {
            self.has_prev_page = true;
            self.prev_page = Some(1);
        }
        self
    }
}
