pub mod course;
pub mod enrollment;
pub mod health;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                         list (?search=&limit=&offset=), create
/// /students/{id}                    get, update
/// /students/{id}/delete             confirm (GET), perform (POST)
/// /students/{id}/enrollments        list enrollments
///
/// /courses                          list (?search=&limit=&offset=), create
/// /courses/{id}                     get, update
/// /courses/{id}/delete              confirm (GET), perform (POST)
/// /courses/{id}/enrollments         list enrollments
///
/// /enrollments                      create
/// /enrollments/{id}                 get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", student::router())
        .nest("/courses", course::router())
        .nest("/enrollments", enrollment::router())
}
