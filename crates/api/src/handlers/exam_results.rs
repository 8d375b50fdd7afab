//! Handlers for mark entry and result cards.
//!
//! Routes nested under `/exam-results`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use campus_results::entry_list::{self, EntryListQuery};
use campus_results::marks::{self, BulkMarksRequest};
use campus_results::result_card::{self, ResultCardQuery};

use crate::error::AppResult;
use crate::middleware::scope::RequestScope;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/exam-results/bulk
///
/// Upsert a batch of marks for one exam. Returns the rows written; rows
/// with an unusable student id or subject are left out.
pub async fn bulk_upsert(
    scope: RequestScope,
    State(state): State<AppState>,
    Json(body): Json<BulkMarksRequest>,
) -> AppResult<impl IntoResponse> {
    let written =
        marks::bulk_upsert(&state.pool, &body.exam_id, &body.items, scope.campus_id).await?;
    Ok(Json(DataResponse { data: written }))
}

/// GET /api/v1/exam-results/entries?examId=&className=&section=&subject=
pub async fn list_entries(
    scope: RequestScope,
    State(state): State<AppState>,
    Query(query): Query<EntryListQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = entry_list::list_entries(&state.pool, &query, scope.campus_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/exam-results/card?studentId=&examId=[&schemeId=]
pub async fn get_result_card(
    scope: RequestScope,
    State(state): State<AppState>,
    Query(query): Query<ResultCardQuery>,
) -> AppResult<impl IntoResponse> {
    let card = result_card::get_student_result_card(&state.pool, &query, scope.campus_id).await?;
    Ok(Json(DataResponse { data: card }))
}
