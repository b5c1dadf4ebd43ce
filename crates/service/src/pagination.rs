//! Pagination utilities for the product listing.
//!
//! Page numbers are 1-based. Inputs come straight from the query string
//! and are coerced leniently: absent or non-numeric values use defaults.

use std::ops::Range;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub limit: i64,
}

impl Pagination {
    /// Coerce raw query values; anything that does not parse as an
    /// integer falls back to the default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, default: i64| {
            raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(default)
        };
        Self { page: parse(page, DEFAULT_PAGE), limit: parse(limit, DEFAULT_LIMIT) }
    }

    /// Slice positions `[(page-1)*limit, page*limit)` clipped to `len`.
    /// `None` when the page lies outside the data or the inputs are not positive.
    pub fn bounds(self, len: usize) -> Option<Range<usize>> {
        if self.page < 1 || self.limit < 1 {
            return None;
        }
        let start = usize::try_from((self.page - 1).checked_mul(self.limit)?).ok()?;
        if start >= len {
            return None;
        }
        let limit = usize::try_from(self.limit).ok()?;
        Some(start..start.saturating_add(limit).min(len))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}
