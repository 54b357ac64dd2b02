//! Handlers for the `/students` resource.
//!
//! Every write validates the form for the deployment's schema variant and
//! checks uniqueness before touching the store. A rejected form is answered
//! with the violated rule and the submitted input.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use registrar_core::student::{check_uniqueness, validate_student, StudentForm, ValidStudent};
use registrar_core::types::DbId;
use registrar_db::models::enrollment::Enrollment;
use registrar_db::models::student::{Student, StudentQuery};
use registrar_db::repositories::{EnrollmentRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::extract::FormJson;
use crate::query::ListParams;
use crate::response::{DataResponse, DeleteConfirmation, ListResponse};
use crate::state::AppState;

/// GET /api/v1/students
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Student>>> {
    let search = params.term();
    let query = StudentQuery {
        search: search.clone(),
        limit: params.limit(),
        offset: params.offset(),
        ..StudentQuery::all(state.schema().order())
    };
    let students = StudentRepo::list(&state.pool, &query).await?;
    Ok(Json(ListResponse {
        data: students,
        search,
    }))
}

/// POST /api/v1/students
pub async fn create(
    State(state): State<AppState>,
    FormJson(form): FormJson<StudentForm>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let valid = checked_student(&state, &form, None).await?;
    let student = StudentRepo::create(&state.pool, &valid)
        .await
        .map_err(|e| AppError::from_write(e, &form))?;

    tracing::info!(
        student_id = student.id,
        roll_number = %student.roll_number,
        "Student created"
    );
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Student>> {
    let student = find_student(&state, id).await?;
    Ok(Json(student))
}

/// PUT /api/v1/students/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(form): FormJson<StudentForm>,
) -> AppResult<Json<Student>> {
    find_student(&state, id).await?;

    let valid = checked_student(&state, &form, Some(id)).await?;
    let student = StudentRepo::update(&state.pool, id, &valid)
        .await
        .map_err(|e| AppError::from_write(e, &form))?
        .ok_or(AppError::not_found("Student", id))?;

    tracing::info!(student_id = id, "Student updated");
    Ok(Json(student))
}

/// GET /api/v1/students/{id}/delete
///
/// Shows what the delete will remove. Nothing is changed.
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteConfirmation<Student>>> {
    let student = find_student(&state, id).await?;
    let enrollment_count = EnrollmentRepo::count_by_student(&state.pool, id).await?;
    Ok(Json(DeleteConfirmation {
        data: student,
        enrollment_count,
        confirm_path: format!("/api/v1/students/{id}/delete"),
    }))
}

/// POST /api/v1/students/{id}/delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = StudentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(student_id = id, "Student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Student", id))
    }
}

/// GET /api/v1/students/{id}/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Enrollment>>>> {
    find_student(&state, id).await?;
    let enrollments = EnrollmentRepo::list_by_student(&state.pool, id).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_student(state: &AppState, id: DbId) -> AppResult<Student> {
    StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Student", id))
}

/// Run every input rule, then the uniqueness checks. `exclude_id` is the
/// student being edited, whose own identifier and email do not collide.
async fn checked_student(
    state: &AppState,
    form: &StudentForm,
    exclude_id: Option<DbId>,
) -> AppResult<ValidStudent> {
    let valid =
        validate_student(form, state.schema()).map_err(|e| AppError::rejected(e, form))?;

    let roll_number_taken =
        StudentRepo::roll_number_taken(&state.pool, &valid.roll_number, exclude_id).await?;
    let email_taken = StudentRepo::email_taken(&state.pool, &valid.email, exclude_id).await?;
    check_uniqueness(roll_number_taken, email_taken).map_err(|e| AppError::rejected(e, form))?;

    Ok(valid)
}
