//! Composition errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{
    errors::StoreError,
    link_codes::LinkCodeError,
    purposes::EmailPurpose,
    templates::{RenderTemplateError, TemplateSetError},
};

/// Errors that can occur while composing an email
#[derive(Debug, Error)]
pub enum ComposeEmailError {
    /// The purpose is a structural fragment, not a complete email
    #[error("{0} is not a composable email purpose")]
    UnsupportedPurpose(EmailPurpose),

    /// One or more template fragments are not configured
    #[error("missing base components: {0:?}")]
    MissingBaseComponents(Vec<EmailPurpose>),

    /// The purpose needs a user record and none was supplied
    #[error("{0} emails require a user")]
    MissingUser(EmailPurpose),

    /// The substitution engine failed
    #[error(transparent)]
    RenderFailed(#[from] RenderTemplateError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<StoreError> for ComposeEmailError {
    fn from(err: StoreError) -> Self {
        debug!("StoreError -> ComposeEmailError");

        ComposeEmailError::UnknownError(err.into())
    }
}

impl From<TemplateSetError> for ComposeEmailError {
    fn from(err: TemplateSetError) -> Self {
        debug!("TemplateSetError -> ComposeEmailError");

        match err {
            TemplateSetError::MissingBaseComponents(missing) => {
                ComposeEmailError::MissingBaseComponents(missing)
            }
            TemplateSetError::Store(e) => e.into(),
        }
    }
}

impl From<LinkCodeError> for ComposeEmailError {
    fn from(err: LinkCodeError) -> Self {
        debug!("LinkCodeError -> ComposeEmailError");

        match err {
            LinkCodeError::MissingUser(purpose) => ComposeEmailError::MissingUser(purpose),
            LinkCodeError::Store(e) => e.into(),
        }
    }
}
