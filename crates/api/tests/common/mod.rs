#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use campus_api::config::ServerConfig;
use campus_api::router::build_app_router;
use campus_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 5,
    }
}

/// Build the full application router on top of the given pool, with the
/// same middleware stack `main.rs` uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a request with an optional `X-Campus-Id` header.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    campus_id: Option<i64>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(campus_id) = campus_id {
        builder = builder.header("x-campus-id", campus_id.to_string());
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, "DELETE", uri, None, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn insert_student(
    pool: &PgPool,
    name: &str,
    roll_number: Option<&str>,
    campus_id: Option<i64>,
) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO students (name, roll_number, class_name, section, campus_id) \
         VALUES ($1, $2, '10', 'A', $3) RETURNING id",
    )
    .bind(name)
    .bind(roll_number)
    .bind(campus_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

pub async fn configure_subject(pool: &PgPool, subject: &str, full_marks: Option<f64>) {
    sqlx::query(
        "INSERT INTO class_subjects (class_name, section, subject_name, full_marks) \
         VALUES ('10', 'A', $1, $2)",
    )
    .bind(subject)
    .bind(full_marks)
    .execute(pool)
    .await
    .unwrap();
}
