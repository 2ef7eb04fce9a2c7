use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A validated, 1-based page request.
///
/// Both values are at least 1. Out-of-range input is rejected here; callers
/// that prefer clamping (the HTTP layer does) clamp before constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;

    pub fn new(page_number: u64, page_size: u64) -> AppResult<Self> {
        if page_number < 1 {
            return Err(AppError::validation("page_number must be at least 1"));
        }
        if page_size < 1 {
            return Err(AppError::validation("page_size must be at least 1"));
        }

        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip before this page starts, `None` when that overflows
    pub fn offset(&self) -> Option<u64> {
        (self.page_number - 1).checked_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page position metadata, as surfaced in the `X-Pagination` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMetadata {
    pub fn new(total_count: u64, page: PageRequest) -> Self {
        let total_pages = total_count.div_ceil(page.page_size);
        Self {
            total_count,
            page_size: page.page_size,
            current_page: page.page_number,
            total_pages,
            has_previous: page.page_number > 1,
            has_next: page.page_number < total_pages,
        }
    }
}

/// A slice of a larger result set plus its position within the whole.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub metadata: PageMetadata,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: PageRequest) -> Self {
        Self {
            items,
            metadata: PageMetadata::new(total_count, page),
        }
    }

    pub fn total_count(&self) -> u64 {
        self.metadata.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.metadata.total_pages
    }

    pub fn current_page(&self) -> u64 {
        self.metadata.current_page
    }

    pub fn has_next(&self) -> bool {
        self.metadata.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.metadata.has_previous
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}
