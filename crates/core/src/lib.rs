//! Domain rules for the registrar service.
//!
//! Pure logic only: no database or HTTP types. The `db` crate persists the
//! values produced here and the `api` crate maps [`error::CoreError`] onto
//! HTTP responses.

pub mod choices;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod grading;
pub mod schema;
pub mod search;
pub mod student;
pub mod types;
pub mod validation;
