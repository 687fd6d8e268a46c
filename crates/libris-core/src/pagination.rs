//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Raw pagination parameters as supplied by a caller.
///
/// Either value may be absent; resolution against a per-list default happens
/// through [`PageQuery::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page number (1-based).
    #[serde(default)]
    pub page: Option<u32>,
    /// Requested number of items per page.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Creates a query with both values set.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Resolves the query to concrete values, falling back to page 1 and the
    /// given default limit.
    #[must_use]
    pub fn resolve(self, default_limit: u32) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(PageRequest::FIRST_PAGE),
            self.limit.unwrap_or(default_limit),
        )
    }
}

/// A resolved request for a page of results.
///
/// Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Number of the first page.
    pub const FIRST_PAGE: u32 = 1;

    /// Creates a new page request, clamping both values to at least 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(Self::FIRST_PAGE),
            limit: limit.max(1),
        }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the row offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}
