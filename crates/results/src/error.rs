use campus_core::error::CoreError;

/// Errors raised by the engine entry points.
///
/// Domain failures (validation, not found, forbidden) come through
/// [`CoreError`]; storage failures keep the underlying [`sqlx::Error`].
/// A storage failure inside a batch is only returned after rollback.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type ResultsResult<T> = Result<T, ResultsError>;
