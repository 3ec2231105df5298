//! Dispatch errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{
    composer::ComposeEmailError, configuration::ScopeId, errors::StoreError,
    mailer::TransportError,
};

/// Errors that can occur when sending an email
#[derive(Debug, Error)]
pub enum SendEmailError {
    /// No mail configuration matches the requested scope
    #[error("no mail configuration found for scope {}", .0.as_ref().map_or("(global)", ScopeId::as_str))]
    ConfigurationNotFound(Option<ScopeId>),

    /// The email could not be composed
    #[error(transparent)]
    Compose(#[from] ComposeEmailError),

    /// The transport failed to build a session or deliver the message
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<StoreError> for SendEmailError {
    fn from(err: StoreError) -> Self {
        debug!("StoreError -> SendEmailError");

        SendEmailError::UnknownError(err.into())
    }
}
