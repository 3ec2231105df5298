//! Link code errors

use thiserror::Error;

use crate::domain::communication::{errors::StoreError, purposes::EmailPurpose};

/// Errors that can occur while resolving a link code
#[derive(Debug, Error)]
pub enum LinkCodeError {
    /// The purpose needs a user record and none was supplied
    #[error("{0} emails require a user")]
    MissingUser(EmailPurpose),

    /// The code issuer failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
