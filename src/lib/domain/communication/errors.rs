//! Errors shared by the communication stores

use thiserror::Error;
use tracing::debug;

/// A lookup against one of the backing stores failed.
///
/// "Nothing found" is never a `StoreError`; stores report absence as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored value could not be interpreted
    #[error("invalid stored value: {0}")]
    InvalidRecord(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        debug!("sqlx::Error -> StoreError: {:?}", err);

        StoreError::UnknownError(err.into())
    }
}
