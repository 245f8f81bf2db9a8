//! Pagination and sort parameters shared by list endpoints
//!
//! The typed filter shape ([`crate::core::record::CarQuery`]) rides alongside
//! these generic options in the URL query string:
//!
//! ```text
//! GET /cars?page=2&limit=10
//! GET /cars?model=GTX&organization_id=org-123&sort=make_year:desc
//! ```

use serde::{Deserialize, Serialize};

/// Generic pagination and sort options for list endpoints
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PageParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Sort field and direction: `field:asc`, `field:desc`, or `field`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

impl PageParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, clamped to the allowed range
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, 100)
    }

    /// Parse the sort option, if present and well-formed
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.as_deref().and_then(SortSpec::parse)
    }

    /// Apply pagination to an already filtered and sorted collection
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PaginationMeta) {
        let meta = PaginationMeta::new(self.page(), self.limit(), items.len());
        let start = (self.page() - 1) * self.limit();
        let page = items.into_iter().skip(start).take(self.limit()).collect();
        (page, meta)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A parsed sort option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse `field`, `field:asc` or `field:desc`. Anything else is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let (field, direction) = match s.split_once(':') {
            None => (s, SortDirection::Ascending),
            Some((field, "asc")) => (field, SortDirection::Ascending),
            Some((field, "desc")) => (field, SortDirection::Descending),
            Some(_) => return None,
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1) * limit;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start + limit < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);
        assert!(params.sort_spec().is_none());
    }

    #[test]
    fn test_page_params_clamps_out_of_range_values() {
        let params = PageParams {
            page: 0,
            limit: 5000,
            sort: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_sort_spec_parse() {
        assert_eq!(
            SortSpec::parse("make_year:desc"),
            Some(SortSpec {
                field: "make_year".to_string(),
                direction: SortDirection::Descending,
            })
        );
        assert_eq!(
            SortSpec::parse("model"),
            Some(SortSpec {
                field: "model".to_string(),
                direction: SortDirection::Ascending,
            })
        );
        assert!(SortSpec::parse("model:sideways").is_none());
        assert!(SortSpec::parse(":desc").is_none());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_paginate_slices_the_requested_page() {
        let params = PageParams {
            page: 2,
            limit: 3,
            sort: None,
        };
        let (page, meta) = params.paginate((1..=8).collect::<Vec<_>>());
        assert_eq!(page, vec![4, 5, 6]);
        assert_eq!(meta.total, 8);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_paginate_past_the_end_is_empty() {
        let params = PageParams {
            page: 9,
            limit: 10,
            sort: None,
        };
        let (page, meta) = params.paginate(vec![1, 2, 3]);
        assert!(page.is_empty());
        assert_eq!(meta.total, 3);
        assert!(!meta.has_next);
    }
}
