//! Pagination request and result page types.

use super::error::{RecipeBrowserError, Result};
use super::recipe::Recipe;
use serde::{Deserialize, Serialize};

/// Default number of recipes per page.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Which slice of the result set is requested.
///
/// Both fields are 1-based/positive; [`PageRequest::new`] rejects zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeBrowserError::InvalidPageRequest`] if `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page == 0 {
            return Err(RecipeBrowserError::InvalidPageRequest(
                "page must be at least 1".to_string(),
            ));
        }
        if limit == 0 {
            return Err(RecipeBrowserError::InvalidPageRequest(
                "limit must be positive".to_string(),
            ));
        }
        Ok(Self { page, limit })
    }

    /// First page with the given limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero.
    pub fn first(limit: u32) -> Result<Self> {
        Self::new(1, limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results returned by a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<Recipe>,
    pub total_pages: u32,
    pub total_count: u64,
}

impl ResultPage {
    /// True if the page holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based index range of the items on `page`, as shown in "Showing 16-30 of 52".
    ///
    /// Returns `None` for an empty page.
    #[must_use]
    pub fn item_range(&self, request: PageRequest) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let start = u64::from(request.page - 1) * u64::from(request.limit) + 1;
        let end = start + self.items.len() as u64 - 1;
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_or_limit_rejected() {
        assert!(PageRequest::new(0, 15).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert_eq!(PageRequest::new(3, 25).unwrap(), PageRequest { page: 3, limit: 25 });
    }

    #[test]
    fn test_item_range() {
        let page = ResultPage {
            items: (0..7).map(|i| Recipe::new(i, format!("r{i}"))).collect(),
            total_pages: 4,
            total_count: 52,
        };
        let request = PageRequest { page: 4, limit: 15 };
        assert_eq!(page.item_range(request), Some((46, 52)));

        let empty = ResultPage { items: vec![], total_pages: 0, total_count: 0 };
        assert_eq!(empty.item_range(PageRequest::default()), None);
    }
}
