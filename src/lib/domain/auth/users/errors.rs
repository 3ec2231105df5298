//! Error types for user lookups

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur when getting a user
#[derive(Debug, Error)]
pub enum GetUserByIdError {
    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for GetUserByIdError {
    fn from(err: sqlx::Error) -> Self {
        debug!("sqlx::Error -> GetUserByIdError: {:?}", err);

        GetUserByIdError::UnknownError(err.into())
    }
}
