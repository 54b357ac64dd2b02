//! Handlers for the `/enrollments` resource.
//!
//! Grade points are never taken from the client for numeric grades; the
//! repository derives them on every write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::enrollment::{
    validate_enrollment_changes, validate_new_enrollment, EnrollmentForm,
};
use registrar_core::types::DbId;
use registrar_core::validation::ValidationError;
use registrar_db::models::enrollment::Enrollment;
use registrar_db::repositories::{CourseRepo, EnrollmentRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::extract::FormJson;
use crate::state::AppState;

/// POST /api/v1/enrollments
pub async fn create(
    State(state): State<AppState>,
    FormJson(form): FormJson<EnrollmentForm>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let new = validate_new_enrollment(&form).map_err(|e| AppError::rejected(e, &form))?;

    if StudentRepo::find_by_id(&state.pool, new.student_id).await?.is_none() {
        return Err(AppError::not_found("Student", new.student_id));
    }
    if CourseRepo::find_by_id(&state.pool, new.course_id).await?.is_none() {
        return Err(AppError::not_found("Course", new.course_id));
    }
    if EnrollmentRepo::exists_for_pair(&state.pool, new.student_id, new.course_id).await? {
        return Err(AppError::rejected(ValidationError::AlreadyEnrolled, &form));
    }

    let enrollment = EnrollmentRepo::create(&state.pool, &new)
        .await
        .map_err(|e| AppError::from_write(e, &form))?;

    tracing::info!(
        enrollment_id = enrollment.id,
        student_id = enrollment.student_id,
        course_id = enrollment.course_id,
        grade = ?enrollment.grade,
        "Enrollment created"
    );
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/v1/enrollments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Enrollment", id))?;
    Ok(Json(enrollment))
}

/// PUT /api/v1/enrollments/{id}
///
/// Partial update: omitted fields keep their stored value, and an empty
/// `grade` clears it. `student_id` and `course_id` are ignored.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(form): FormJson<EnrollmentForm>,
) -> AppResult<Json<Enrollment>> {
    let changes = validate_enrollment_changes(&form).map_err(|e| AppError::rejected(e, &form))?;
    let enrollment = EnrollmentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found("Enrollment", id))?;

    tracing::info!(
        enrollment_id = id,
        grade = ?enrollment.grade,
        grade_points = ?enrollment.grade_points,
        "Enrollment updated"
    );
    Ok(Json(enrollment))
}

/// DELETE /api/v1/enrollments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EnrollmentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(enrollment_id = id, "Enrollment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Enrollment", id))
    }
}
