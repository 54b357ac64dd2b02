#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use registrar_core::schema::SchemaVariant;
use sqlx::PgPool;
use tower::ServiceExt;

use registrar_api::config::{LogFormat, ServerConfig};
use registrar_api::router::build_app_router;
use registrar_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults for the given schema.
pub fn test_config(schema: SchemaVariant) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        schema,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router for the simple student schema.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_schema(pool, SchemaVariant::Simple)
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app_with_schema(pool: PgPool, schema: SchemaVariant) -> Router {
    let config = test_config(schema);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a raw body labelled as JSON, for bodies `serde_json::Value` cannot express.
pub async fn post_raw_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::post(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a simple-schema student and return its id.
pub async fn create_student(pool: &PgPool, name: &str, roll_number: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/students",
        serde_json::json!({
            "name": name,
            "roll_number": roll_number,
            "email": email,
            "marks": 75,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a course and return its id.
pub async fn create_course(pool: &PgPool, code: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/courses",
        serde_json::json!({
            "code": code,
            "name": format!("Course {code}"),
            "instructor": "Dr. Hopper",
            "semester": "Fall",
            "year": 2026,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Enroll a student in a course and return the enrollment body.
pub async fn enroll(
    pool: &PgPool,
    student_id: i64,
    course_id: i64,
    extra: serde_json::Value,
) -> serde_json::Value {
    let mut body = serde_json::json!({ "student_id": student_id, "course_id": course_id });
    if let (Some(target), Some(fields)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    let response = post_json(build_test_app(pool.clone()), "/api/v1/enrollments", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
