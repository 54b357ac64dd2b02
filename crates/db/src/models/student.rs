//! Student entity model.

use registrar_core::schema::StudentOrder;
use registrar_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `students` table.
///
/// Columns belonging to the inactive schema variant are `NULL` and are left
/// out of the serialized form. Decimals serialize as JSON numbers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub roll_number: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub marks: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub gpa: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filter, order and page for [`StudentRepo::list`](crate::repositories::StudentRepo::list).
#[derive(Debug, Clone)]
pub struct StudentQuery {
    /// Case-insensitive substring of `name` or `roll_number`.
    pub search: Option<String>,
    pub order: StudentOrder,
    /// `None` returns every matching row.
    pub limit: Option<i64>,
    pub offset: i64,
}

impl StudentQuery {
    /// Every student in the given order.
    pub fn all(order: StudentOrder) -> Self {
        Self {
            search: None,
            order,
            limit: None,
            offset: 0,
        }
    }
}
