//! Validated grading scheme writes.
//!
//! Reads go straight to [`GradingSchemeRepo`]; writes check the name and
//! band mapping first so malformed schemes never reach storage.

use campus_core::grading::{validate_bands, validate_scheme_name};
use campus_core::types::DbId;
use campus_db::models::grading_scheme::{CreateGradingScheme, GradingScheme, UpdateGradingScheme};
use campus_db::repositories::GradingSchemeRepo;
use campus_db::DbPool;

use crate::error::ResultsResult;

/// Validate and create a scheme in the given campus scope.
pub async fn create_scheme(
    pool: &DbPool,
    input: &CreateGradingScheme,
    campus_id: Option<DbId>,
    created_by: Option<DbId>,
) -> ResultsResult<GradingScheme> {
    validate_scheme_name(&input.name)?;
    validate_bands(&input.bands)?;

    let scheme = GradingSchemeRepo::create(pool, input, campus_id, created_by).await?;
    tracing::info!(
        scheme_id = scheme.id,
        ?campus_id,
        is_default = scheme.is_default,
        "Grading scheme created"
    );
    Ok(scheme)
}

/// Validate the supplied fields and update a scheme.
///
/// Returns `None` if the scheme does not exist.
pub async fn update_scheme(
    pool: &DbPool,
    id: DbId,
    input: &UpdateGradingScheme,
) -> ResultsResult<Option<GradingScheme>> {
    if let Some(name) = &input.name {
        validate_scheme_name(name)?;
    }
    if let Some(bands) = &input.bands {
        validate_bands(bands)?;
    }

    Ok(GradingSchemeRepo::update(pool, id, input).await?)
}
