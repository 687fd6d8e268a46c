//! Pagination extractor.

use crate::{responses::AppError, state::AppState};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use libris_core::{LibrisError, PageQuery};
use serde::Deserialize;

/// Query parameters for pagination.
///
/// Signed so that `page=0` or `limit=-5` clamp to 1 instead of failing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

fn clamp(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

impl PaginationQuery {
    /// Clamps both values to at least 1 and `limit` to at most `max_limit`.
    #[must_use]
    pub fn into_page_query(self, max_limit: u32) -> PageQuery {
        PageQuery {
            page: self.page.map(clamp),
            limit: self.limit.map(|limit| clamp(limit).min(max_limit)),
        }
    }
}

/// Extracts `page` and `limit` from the query string.
///
/// Non-numeric values are rejected with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub PageQuery);

#[async_trait]
impl FromRequestParts<AppState> for Pagination {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError(LibrisError::Deserialization(e.body_text())))?;
        Ok(Pagination(query.into_page_query(state.max_page_size())))
    }
}
