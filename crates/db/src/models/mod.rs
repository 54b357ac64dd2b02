//! Row models and query parameter types.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row. Write inputs are the validated types from
//! `registrar_core`, so nothing unvalidated reaches a repository.

pub mod course;
pub mod enrollment;
pub mod student;
