//! Route definitions for marks and result cards, mounted at `/exam-results`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::exam_results;
use crate::state::AppState;

/// ```text
/// POST /bulk     -> bulk_upsert
/// GET  /entries  -> list_entries
/// GET  /card     -> get_result_card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bulk", post(exam_results::bulk_upsert))
        .route("/entries", get(exam_results::list_entries))
        .route("/card", get(exam_results::get_result_card))
}
