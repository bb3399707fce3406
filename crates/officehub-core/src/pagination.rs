//! Page-based pagination.
//!
//! List endpoints accept `?page=&limit=` and answer with
//! `{ items: [...], meta: { total, page, limit, totalPages, hasMore } }`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::serde::deserialize_optional_i64;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Query parameters for pagination.
///
/// `limit` is clamped to [1, 100] and `page` to a minimum of 1.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta::new(total, self.page(), self.limit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            total,
            page,
            limit,
            total_pages,
            has_more: page * limit < total,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            items,
            meta: params.meta(total),
        }
    }
}
