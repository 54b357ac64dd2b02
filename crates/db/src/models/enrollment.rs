//! Enrollment entity model.

use registrar_core::choices::EnrollmentStatus;
use registrar_core::enrollment::EnrollmentState;
use registrar_core::grading::Grade;
use registrar_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub enrollment_date: Date,
    pub status: String,
    pub grade: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub grade_points: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub attendance_percentage: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Enrollment {
    /// The mutable fields in domain form.
    ///
    /// Codes are guaranteed valid by the table's `CHECK` constraints.
    pub fn state(&self) -> EnrollmentState {
        EnrollmentState {
            status: EnrollmentStatus::from_code(&self.status).unwrap_or_default(),
            grade: self.grade.as_deref().and_then(Grade::from_code),
            grade_points: self.grade_points,
            attendance_percentage: self.attendance_percentage,
        }
    }
}
