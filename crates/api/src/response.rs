//! Shared response envelope types for API handlers.
//!
//! Create, detail and update return the bare record. Listings and delete
//! confirmations wrap their payload in a `data` field alongside metadata.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A listing together with the search term that produced it.
///
/// `search` is `null` when the listing is unfiltered.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub search: Option<String>,
}

/// What a delete will remove, returned before the caller confirms it.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation<T: Serialize> {
    pub data: T,
    /// Enrollments that will be removed along with the record.
    pub enrollment_count: i64,
    /// Path to `POST` to perform the delete.
    pub confirm_path: String,
}
