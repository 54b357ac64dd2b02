//! Handlers for the `/courses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::course::{validate_course, CourseForm, ValidCourse};
use registrar_core::types::DbId;
use registrar_core::validation::ValidationError;
use registrar_db::models::course::{Course, CourseQuery};
use registrar_db::models::enrollment::Enrollment;
use registrar_db::repositories::{CourseRepo, EnrollmentRepo};

use crate::error::{AppError, AppResult};
use crate::extract::FormJson;
use crate::query::ListParams;
use crate::response::{DataResponse, DeleteConfirmation, ListResponse};
use crate::state::AppState;

/// GET /api/v1/courses
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Course>>> {
    let search = params.term();
    let query = CourseQuery {
        search: search.clone(),
        limit: params.limit(),
        offset: params.offset(),
    };
    let courses = CourseRepo::list(&state.pool, &query).await?;
    Ok(Json(ListResponse {
        data: courses,
        search,
    }))
}

/// POST /api/v1/courses
pub async fn create(
    State(state): State<AppState>,
    FormJson(form): FormJson<CourseForm>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let valid = checked_course(&state, &form, None).await?;
    let course = CourseRepo::create(&state.pool, &valid)
        .await
        .map_err(|e| AppError::from_write(e, &form))?;

    tracing::info!(course_id = course.id, code = %course.code, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let course = find_course(&state, id).await?;
    Ok(Json(course))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(form): FormJson<CourseForm>,
) -> AppResult<Json<Course>> {
    find_course(&state, id).await?;

    let valid = checked_course(&state, &form, Some(id)).await?;
    let course = CourseRepo::update(&state.pool, id, &valid)
        .await
        .map_err(|e| AppError::from_write(e, &form))?
        .ok_or(AppError::not_found("Course", id))?;

    tracing::info!(course_id = id, "Course updated");
    Ok(Json(course))
}

/// GET /api/v1/courses/{id}/delete
///
/// Shows what the delete will remove. Nothing is changed.
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteConfirmation<Course>>> {
    let course = find_course(&state, id).await?;
    let enrollment_count = EnrollmentRepo::count_by_course(&state.pool, id).await?;
    Ok(Json(DeleteConfirmation {
        data: course,
        enrollment_count,
        confirm_path: format!("/api/v1/courses/{id}/delete"),
    }))
}

/// POST /api/v1/courses/{id}/delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(course_id = id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Course", id))
    }
}

/// GET /api/v1/courses/{id}/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Enrollment>>>> {
    find_course(&state, id).await?;
    let enrollments = EnrollmentRepo::list_by_course(&state.pool, id).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_course(state: &AppState, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Course", id))
}

async fn checked_course(
    state: &AppState,
    form: &CourseForm,
    exclude_id: Option<DbId>,
) -> AppResult<ValidCourse> {
    let valid = validate_course(form).map_err(|e| AppError::rejected(e, form))?;
    if CourseRepo::code_taken(&state.pool, &valid.code, exclude_id).await? {
        return Err(AppError::rejected(ValidationError::DuplicateCourseCode, form));
    }
    Ok(valid)
}
