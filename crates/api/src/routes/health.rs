//! Liveness probe for the grading service.
//!
//! Mounted at the root (`/health`), outside `/api/v1`, so load balancers do
//! not need the campus headers. The status degrades rather than failing
//! when Postgres stops answering: marks and cards cannot be served then,
//! but the process itself is up.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "campus-results";

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match campus_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
