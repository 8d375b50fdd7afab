pub mod exam_results;
pub mod grading_schemes;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /grading-schemes                      list, create
/// /grading-schemes/default              default for the caller's campus
/// /grading-schemes/{id}                 get, update, delete
/// /grading-schemes/{id}/set-default     make default (POST)
///
/// /exam-results/bulk                    bulk upsert marks (POST)
/// /exam-results/entries                 roster with marks for one subject
/// /exam-results/card                    per-student result card
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/grading-schemes", grading_schemes::router())
        .nest("/exam-results", exam_results::router())
}
