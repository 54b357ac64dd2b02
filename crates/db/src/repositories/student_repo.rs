//! Repository for the `students` table.

use registrar_core::schema::{SchemaVariant, StudentOrder};
use registrar_core::search::{like_pattern, normalize_search};
use registrar_core::student::ValidStudent;
use registrar_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{Student, StudentQuery};

/// Column list for students queries.
const COLUMNS: &str = "\
    id, roll_number, name, first_name, last_name, email, marks, gpa, \
    phone, date_of_birth, gender, address, year_level, major, \
    enrollment_date, is_active, created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &ValidStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students \
                (roll_number, name, first_name, last_name, email, marks, gpa, \
                 phone, date_of_birth, gender, address, year_level, major, \
                 enrollment_date, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.roll_number)
            .bind(&input.name)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.marks)
            .bind(input.gpa)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(input.gender.map(|g| g.code()))
            .bind(&input.address)
            .bind(input.year_level.map(|y| y.code()))
            .bind(&input.major)
            .bind(input.enrollment_date)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students, optionally filtered by a case-insensitive substring of
    /// `name` or `roll_number`.
    ///
    /// A `None` limit binds SQL `NULL`, which Postgres treats as no limit.
    pub async fn list(pool: &PgPool, params: &StudentQuery) -> Result<Vec<Student>, sqlx::Error> {
        let term = normalize_search(params.search.as_deref());

        let mut bind_idx = 1u32;
        let where_clause = if term.is_some() {
            bind_idx += 1;
            "WHERE name ILIKE $1 ESCAPE '\\' OR roll_number ILIKE $1 ESCAPE '\\'"
        } else {
            ""
        };

        let query = format!(
            "SELECT {COLUMNS} FROM students \
             {where_clause} \
             ORDER BY {order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order = order_clause(params.order),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Student>(&query);
        if let Some(term) = term {
            q = q.bind(like_pattern(&term));
        }
        q.bind(params.limit).bind(params.offset).fetch_all(pool).await
    }

    /// Replace the fields `input.variant` owns. Columns that only the other
    /// variant writes keep their stored values. Returns `None` if no row has
    /// `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ValidStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        match input.variant {
            SchemaVariant::Simple => Self::update_simple(pool, id, input).await,
            SchemaVariant::Rich => Self::update_rich(pool, id, input).await,
        }
    }

    async fn update_simple(
        pool: &PgPool,
        id: DbId,
        input: &ValidStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET \
                roll_number = $2, name = $3, email = $4, marks = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.roll_number)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.marks)
            .fetch_optional(pool)
            .await
    }

    async fn update_rich(
        pool: &PgPool,
        id: DbId,
        input: &ValidStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET \
                roll_number = $2, name = $3, first_name = $4, last_name = $5, \
                email = $6, gpa = $7, phone = $8, date_of_birth = $9, \
                gender = $10, address = $11, year_level = $12, major = $13, \
                enrollment_date = $14, is_active = $15 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.roll_number)
            .bind(&input.name)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.gpa)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(input.gender.map(|g| g.code()))
            .bind(&input.address)
            .bind(input.year_level.map(|y| y.code()))
            .bind(&input.major)
            .bind(input.enrollment_date)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student. Enrollments go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether another student already holds `roll_number`.
    pub async fn roll_number_taken(
        pool: &PgPool,
        roll_number: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 FROM students \
                WHERE roll_number = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(roll_number)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Whether another student already holds `email`.
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (\
                SELECT 1 FROM students \
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }
}

fn order_clause(order: StudentOrder) -> &'static str {
    match order {
        StudentOrder::RollNumber => "roll_number",
        StudentOrder::LastNameFirstName => "last_name, first_name, roll_number",
    }
}
