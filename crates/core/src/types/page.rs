//! Pagination primitives shared by every listing operation.
//!
//! A [`PageRequest`] is a validated page/size pair plus a sort direction;
//! repositories turn it into `LIMIT`/`OFFSET` and an `ORDER BY`, and project
//! results into a [`Page`]. Pages are 0-based.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a direction from its query-parameter form (`asc`/`desc`,
    /// case-insensitive). Anything else falls back to ascending.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// A 0-based page request with a clamped size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page request, clamping `size` into `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        let size = if size == 0 {
            DEFAULT_PAGE_SIZE
        } else if size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            size
        };
        Self { page, size }
    }

    /// The 0-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// SQL `LIMIT` value.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.size as i64
    }

    /// SQL `OFFSET` value.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the totals needed to render pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The rows on this page.
    pub content: Vec<T>,
    /// 0-based page index this page was requested with.
    pub page: u32,
    /// Requested page size (the content may be shorter on the last page).
    pub size: u32,
    /// Total number of rows across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Assemble a page from its parts.
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.total_elements == 0 {
            0
        } else {
            self.total_elements.div_ceil(u64::from(self.size))
        }
    }

    /// Whether this page holds no rows. An empty page is a valid result, not
    /// an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Map the content, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 7).size(), 7);
        assert_eq!(PageRequest::new(0, 10_000).size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let request = PageRequest::new(3, 20);
        assert_eq!(request.limit(), 20);
        assert_eq!(request.offset(), 60);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(0, 10);
        assert_eq!(Page::<i32>::new(vec![], request, 0).total_pages(), 0);
        assert_eq!(Page::<i32>::new(vec![], request, 10).total_pages(), 1);
        assert_eq!(Page::<i32>::new(vec![], request, 11).total_pages(), 2);
    }

    #[test]
    fn test_empty_page_is_valid() {
        let page = Page::<i32>::new(vec![], PageRequest::default(), 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(SortDirection::parse_or_default("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default("asc"), SortDirection::Asc);
        assert_eq!(
            SortDirection::parse_or_default("sideways"),
            SortDirection::Asc
        );
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(1, 3), 9);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20, 30]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_elements, 9);
    }
}
