use super::error::StoreError;
use serde::Serialize;

/// Page sizes offered when no configuration overrides them.
pub const DEFAULT_PAGE_SIZES: [u32; 3] = [10, 25, 50];

#[derive(Debug, Clone, Copy)]
pub struct LimitOffset {
    pub limit: i64,
    pub offset: i64,
}

/// A 1-based page number and a page size taken from the allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32, allowed_sizes: &[u32]) -> Result<Self, StoreError> {
        if !allowed_sizes.contains(&page_size) {
            return Err(StoreError::InvalidPageSize {
                size: page_size,
                allowed: allowed_sizes.to_vec(),
            });
        }
        if page == 0 {
            return Err(StoreError::InvalidPage { page });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limit_offset(&self) -> LimitOffset {
        LimitOffset {
            limit: i64::from(self.page_size),
            offset: i64::from(self.page - 1) * i64::from(self.page_size),
        }
    }
}

/// One slice of an ordered result set plus the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as usize) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
