//! Request scope extractor.
//!
//! Campus scoping and authentication happen upstream; they hand this layer
//! the caller's campus and user ids as headers, which are trusted verbatim.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::error::CoreError;
use campus_core::types::DbId;

use crate::error::AppError;

/// Header carrying the caller's campus id.
pub const CAMPUS_ID_HEADER: &str = "x-campus-id";
/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Campus and user supplied by the upstream scoping layer.
///
/// Both are optional: a request without `X-Campus-Id` is unscoped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestScope {
    pub campus_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

impl<S: Send + Sync> FromRequestParts<S> for RequestScope {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestScope {
            campus_id: id_header(parts, CAMPUS_ID_HEADER)?,
            user_id: id_header(parts, USER_ID_HEADER)?,
        })
    }
}

fn id_header(parts: &Parts, name: &str) -> Result<Option<DbId>, AppError> {
    let Some(value) = parts.headers.get(name) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<DbId>().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "{name} header must be an integer"
            )))
        })
}
