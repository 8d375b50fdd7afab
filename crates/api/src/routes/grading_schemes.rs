//! Route definitions for grading schemes, mounted at `/grading-schemes`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::grading_schemes;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_schemes
/// POST   /                  -> create_scheme
/// GET    /default           -> get_default_scheme
/// GET    /{id}              -> get_scheme
/// PUT    /{id}              -> update_scheme
/// DELETE /{id}              -> delete_scheme
/// POST   /{id}/set-default  -> set_default_scheme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(grading_schemes::list_schemes).post(grading_schemes::create_scheme),
        )
        .route("/default", get(grading_schemes::get_default_scheme))
        .route(
            "/{id}",
            get(grading_schemes::get_scheme)
                .put(grading_schemes::update_scheme)
                .delete(grading_schemes::delete_scheme),
        )
        .route(
            "/{id}/set-default",
            post(grading_schemes::set_default_scheme),
        )
}
