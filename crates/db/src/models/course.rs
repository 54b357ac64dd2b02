//! Course entity model.

use registrar_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filter and page for course listings, ordered by `code`.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    /// Case-insensitive substring of `code` or `name`.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: i64,
}
