//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values and need
//! neither an HTTP server nor a database.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use registrar_api::error::AppError;
use registrar_core::student::StudentForm;
use registrar_core::validation::{NumericInput, ValidationError};
use rust_decimal::Decimal;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::not_found("Student", 42);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Student with id 42 not found");
}

// ---------------------------------------------------------------------------
// Rejected forms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_returns_400_with_field() {
    let err = AppError::rejected(
        ValidationError::OutOfRange {
            field: "marks",
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        },
        &StudentForm::default(),
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "OUT_OF_RANGE");
    assert_eq!(json["field"], "marks");
    assert_eq!(json["error"], "marks should be between 0 and 100!");
}

#[tokio::test]
async fn rejected_form_echoes_input() {
    let form = StudentForm {
        name: Some("Bob".into()),
        roll_number: Some("R001".into()),
        email: Some("bob@x.com".into()),
        marks: Some(NumericInput::from("60")),
        ..Default::default()
    };
    let err = AppError::rejected(ValidationError::DuplicateIdentifier, &form);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_IDENTIFIER");
    assert_eq!(json["field"], "roll_number");
    assert_eq!(json["error"], "A student with this roll number already exists!");
    assert_eq!(json["input"]["roll_number"], "R001");
    assert_eq!(json["input"]["marks"], "60");
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let err = AppError::rejected(
        ValidationError::MissingField { field: "email" },
        &StudentForm::default(),
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_FIELD");
    assert!(json["input"].is_object());
}

#[test]
fn non_unique_write_errors_stay_database_errors() {
    let err = AppError::from_write(sqlx::Error::RowNotFound, &StudentForm::default());
    assert_matches!(err, AppError::Database(sqlx::Error::RowNotFound));
}

// ---------------------------------------------------------------------------
// Request body errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("expected value at line 1 column 1".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "expected value at line 1 column 1");
}

#[tokio::test]
async fn unreadable_input_is_echoed() {
    let err = AppError::Unreadable {
        message: "invalid type: integer `5`, expected a string".into(),
        input: serde_json::json!({ "name": 5 }),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNREADABLE_INPUT");
    assert_eq!(json["input"]["name"], 5);
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_are_sanitized() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
