//! Repository for the `enrollments` table.
//!
//! Both write paths store `EnrollmentState::with_derived_points()`, so the
//! persisted `grade_points` always reflects the persisted `grade`.

use registrar_core::enrollment::{EnrollmentChanges, EnrollmentState, NewEnrollment};
use registrar_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::enrollment::Enrollment;

/// Column list for enrollments queries.
const COLUMNS: &str = "\
    id, student_id, course_id, enrollment_date, status, grade, grade_points, \
    attendance_percentage, created_at, updated_at";

/// Provides CRUD operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll a student in a course, returning the created row.
    ///
    /// Fails with a unique violation on `uq_enrollments_student_course` if
    /// the pair already exists, or a foreign key violation if either side
    /// is missing.
    pub async fn create(pool: &PgPool, input: &NewEnrollment) -> Result<Enrollment, sqlx::Error> {
        let state = input.state.clone().with_derived_points();
        let query = format!(
            "INSERT INTO enrollments \
                (student_id, course_id, status, grade, grade_points, attendance_percentage) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.student_id)
            .bind(input.course_id)
            .bind(state.status.code())
            .bind(state.grade.map(|g| g.code()))
            .bind(state.grade_points)
            .bind(state.attendance_percentage)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a student's enrollments, newest first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments \
             WHERE student_id = $1 \
             ORDER BY enrollment_date DESC, id DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List a course's enrollments, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments \
             WHERE course_id = $1 \
             ORDER BY enrollment_date DESC, id DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Number of enrollments a student holds. Shown on the delete
    /// confirmation as the cascade count.
    pub async fn count_by_student(pool: &PgPool, student_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(pool)
            .await
    }

    /// Number of enrollments in a course.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Whether the student is already enrolled in the course.
    pub async fn exists_for_pair(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// Apply a partial update. Returns `None` if no row has `id`.
    ///
    /// The row is locked while the changes are merged over its current
    /// state, so concurrent updates cannot interleave.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &EnrollmentChanges,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Enrollment>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let next = changes.apply(&current.state()).with_derived_points();
        tracing::debug!(
            enrollment_id = id,
            grade = ?next.grade,
            grade_points = ?next.grade_points,
            "Writing enrollment state"
        );
        let updated = Self::write_state(&mut tx, id, &next).await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete an enrollment.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn write_state(
        conn: &mut PgConnection,
        id: DbId,
        state: &EnrollmentState,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET \
                status = $2, grade = $3, grade_points = $4, attendance_percentage = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(state.status.code())
            .bind(state.grade.map(|g| g.code()))
            .bind(state.grade_points)
            .bind(state.attendance_percentage)
            .fetch_one(conn)
            .await
    }
}
