//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// GET    /{id}/delete         -> confirm_delete
/// POST   /{id}/delete         -> delete
/// GET    /{id}/enrollments    -> list_enrollments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(student::list).post(student::create))
        .route("/{id}", get(student::get_by_id).put(student::update))
        .route(
            "/{id}/delete",
            get(student::confirm_delete).post(student::delete),
        )
        .route("/{id}/enrollments", get(student::list_enrollments))
}
