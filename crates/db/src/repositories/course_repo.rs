//! Repository for the `courses` table.

use registrar_core::course::ValidCourse;
use registrar_core::search::{like_pattern, normalize_search};
use registrar_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseQuery};

/// Column list for courses queries.
const COLUMNS: &str = "\
    id, code, name, description, credits, instructor, semester, year, \
    created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &ValidCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses \
                (code, name, description, credits, instructor, semester, year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.credits)
            .bind(&input.instructor)
            .bind(&input.semester)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    /// Find a course by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses ordered by code, optionally filtered by a
    /// case-insensitive substring of `code` or `name`.
    pub async fn list(pool: &PgPool, params: &CourseQuery) -> Result<Vec<Course>, sqlx::Error> {
        let term = normalize_search(params.search.as_deref());

        let mut bind_idx = 1u32;
        let where_clause = if term.is_some() {
            bind_idx += 1;
            "WHERE code ILIKE $1 ESCAPE '\\' OR name ILIKE $1 ESCAPE '\\'"
        } else {
            ""
        };

        let query = format!(
            "SELECT {COLUMNS} FROM courses \
             {where_clause} \
             ORDER BY code \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Course>(&query);
        if let Some(term) = term {
            q = q.bind(like_pattern(&term));
        }
        q.bind(params.limit).bind(params.offset).fetch_all(pool).await
    }

    /// Replace every field of a course. Returns `None` if no row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ValidCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                code = $2, name = $3, description = $4, credits = $5, \
                instructor = $6, semester = $7, year = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.credits)
            .bind(&input.instructor)
            .bind(&input.semester)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course. Enrollments go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether another course already uses `code`.
    pub async fn code_taken(
        pool: &PgPool,
        code: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 FROM courses \
                WHERE code = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(code)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }
}
