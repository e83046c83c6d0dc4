//! Paging for the user list.

use serde::{Deserialize, Serialize};

use crate::types::HospitalId;

/// Default page size when neither the request nor configuration gives one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on page size requested from the backend.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging metadata returned by the backend alongside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Metadata for a list that fits on a single page.
    pub fn single(total: usize) -> Self {
        Self {
            page: 1,
            limit: total.max(1) as u32,
            total: total as u64,
            total_pages: 1,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Filters and paging for `getUsers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<HospitalId>,
}

impl UserListQuery {
    /// Clamp paging values and drop blank filters.
    pub fn normalized(&self, default_limit: u32) -> Self {
        Self {
            page: Some(clamp_page(self.page)),
            limit: Some(clamp_limit(self.limit, default_limit, MAX_PAGE_SIZE)),
            search: blank_to_none(&self.search),
            hospital_id: blank_to_none(&self.hospital_id),
        }
    }
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<u32>, default: u32, max: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, max)
}
