//! Shared query parameter types for API handlers.

use registrar_core::search::{clamp_limit, clamp_offset, normalize_search};
use serde::Deserialize;

/// Listing parameters (`?search=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Trimmed search term; blank input means no filter.
    pub fn term(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }

    /// Page size clamped to the allowed range. `None` returns every row.
    pub fn limit(&self) -> Option<i64> {
        clamp_limit(self.limit)
    }

    pub fn offset(&self) -> i64 {
        clamp_offset(self.offset)
    }
}
