use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use registrar_core::error::CoreError;
use registrar_core::validation::ValidationError;
use serde::Serialize;
use serde_json::json;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `registrar_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A form that failed validation, with the submitted input so the
    /// caller can redisplay it.
    #[error("{error}")]
    Rejected {
        error: ValidationError,
        input: serde_json::Value,
    },

    /// A body that is valid JSON but does not have the form's shape.
    #[error("Unreadable input: {message}")]
    Unreadable {
        message: String,
        input: serde_json::Value,
    },

    /// A body that could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Reject `input` because of `error`.
    pub fn rejected(error: ValidationError, input: &impl Serialize) -> Self {
        AppError::Rejected {
            error,
            input: serde_json::to_value(input).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Wrap a failed write, turning a unique violation that slipped past the
    /// pre-write checks into the same rejection those checks would give.
    pub fn from_write(err: sqlx::Error, input: &impl Serialize) -> Self {
        match unique_violation(&err) {
            Some(error) => Self::rejected(error, input),
            None => AppError::Database(err),
        }
    }

    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: registrar_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // --- CoreError variants ---
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": format!("{entity} with id {id} not found"),
                    "code": "NOT_FOUND",
                }),
            ),
            // --- Rejected forms ---
            AppError::Rejected { error, input } => {
                let mut body = validation_body(&error);
                body["input"] = input;
                (validation_status(&error), body)
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- Request body errors ---
            AppError::Unreadable { message, input } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": message,
                    "code": "UNREADABLE_INPUT",
                    "input": input,
                }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Input defects are 400; collisions with existing records are 409.
fn validation_status(error: &ValidationError) -> StatusCode {
    if error.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    }
}

fn validation_body(error: &ValidationError) -> serde_json::Value {
    json!({
        "error": error.to_string(),
        "code": error.code(),
        "field": error.field(),
    })
}

fn internal_error() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        }),
    )
}

/// The validation error matching a unique violation on a known constraint.
fn unique_violation(err: &sqlx::Error) -> Option<ValidationError> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
            db_err
                .constraint()
                .and_then(ValidationError::from_unique_constraint)
        }
        _ => None,
    }
}

/// Classify a sqlx error into an HTTP status and JSON body.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a known constraint map to the matching
///   validation error; other `uq_` constraints map to a generic 409.
/// - Foreign key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, serde_json::Value) {
    if let Some(error) = unique_violation(err) {
        return (validation_status(&error), validation_body(&error));
    }

    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            json!({ "error": "Resource not found", "code": "NOT_FOUND" }),
        ),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            if code.as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        json!({
                            "error": format!("Duplicate value violates unique constraint: {constraint}"),
                            "code": "CONFLICT",
                        }),
                    );
                }
            }
            if code.as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) {
                return (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Referenced record does not exist",
                        "code": "INVALID_REFERENCE",
                    }),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
