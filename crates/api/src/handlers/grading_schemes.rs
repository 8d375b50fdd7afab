//! Handlers for grading scheme management.
//!
//! Routes nested under `/grading-schemes`. The campus scope comes from the
//! `X-Campus-Id` header; requests without it act on the global scope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::grading_scheme::{CreateGradingScheme, GradingScheme, UpdateGradingScheme};
use campus_db::repositories::GradingSchemeRepo;
use campus_results::schemes;

use crate::error::{AppError, AppResult};
use crate::middleware::scope::RequestScope;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GradingScheme",
        id,
    })
}

/// GET /api/v1/grading-schemes
///
/// List schemes in the caller's campus, default first.
pub async fn list_schemes(
    scope: RequestScope,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = GradingSchemeRepo::list(&state.pool, scope.campus_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/grading-schemes/default
///
/// The default scheme for the caller's campus, or `null` if none is set.
pub async fn get_default_scheme(
    scope: RequestScope,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let scheme: Option<GradingScheme> =
        GradingSchemeRepo::find_default(&state.pool, scope.campus_id).await?;
    Ok(Json(DataResponse { data: scheme }))
}

/// GET /api/v1/grading-schemes/{id}
pub async fn get_scheme(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scheme = GradingSchemeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: scheme }))
}

/// POST /api/v1/grading-schemes
pub async fn create_scheme(
    scope: RequestScope,
    State(state): State<AppState>,
    Json(input): Json<CreateGradingScheme>,
) -> AppResult<impl IntoResponse> {
    let scheme =
        schemes::create_scheme(&state.pool, &input, scope.campus_id, scope.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: scheme })))
}

/// PUT /api/v1/grading-schemes/{id}
///
/// Partial update; only supplied fields change.
pub async fn update_scheme(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGradingScheme>,
) -> AppResult<impl IntoResponse> {
    let scheme = schemes::update_scheme(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: scheme }))
}

/// POST /api/v1/grading-schemes/{id}/set-default
pub async fn set_default_scheme(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scheme = GradingSchemeRepo::set_default(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: scheme }))
}

/// DELETE /api/v1/grading-schemes/{id}
pub async fn delete_scheme(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !GradingSchemeRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(scheme_id = id, "Grading scheme deleted");
    Ok(StatusCode::NO_CONTENT)
}
