//! Page arithmetic
//!
//! Pure functions for turning 1-based page numbers into the offset-based
//! `limit`/`skip` query the posts endpoint understands, and back into page
//! counts for navigation output.

use serde::{Deserialize, Serialize};

/// Page size used when none (or zero) is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Error type for pagination operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page numbers start at 1, got {0}")]
    InvalidPage(usize),

    #[error("Page {page} is out of range. Only {total_pages} pages available.")]
    OutOfRange { page: usize, total_pages: usize },
}

/// A request for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

/// Offset-based query parameters sent over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetQuery {
    pub limit: usize,
    pub skip: usize,
}

impl PageRequest {
    /// Build a request, rejecting page 0
    pub fn new(page: usize, page_size: usize) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage(page));
        }

        Ok(Self {
            page,
            page_size: effective_page_size(page_size),
        })
    }

    /// The first page at the given size
    pub fn first(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: effective_page_size(page_size),
        }
    }

    /// Convert to `limit`/`skip`
    ///
    /// `skip = (page - 1) * limit`, with the limit falling back to
    /// [`DEFAULT_PAGE_SIZE`] when the page size is zero.
    pub fn to_query(&self) -> OffsetQuery {
        let limit = effective_page_size(self.page_size);
        let skip = self.page.saturating_sub(1) * limit;

        OffsetQuery { limit, skip }
    }
}

/// Map a zero page size to the default
pub fn effective_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// Number of pages needed to hold `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(effective_page_size(page_size))
}

/// Check that `page` exists for a result set of `total` items
///
/// An empty result set still has a (blank) first page.
pub fn validate_page(total: usize, page: usize, page_size: usize) -> Result<(), PaginationError> {
    if page == 0 {
        return Err(PaginationError::InvalidPage(page));
    }

    let total_pages = page_count(total, page_size);
    if page > total_pages.max(1) {
        return Err(PaginationError::OutOfRange { page, total_pages });
    }

    Ok(())
}
