//! Mail transport errors

use lettre::{address::AddressError, error::Error as MessageError, transport::smtp};
use thiserror::Error;

/// Errors raised while building, sending or verifying over a transport session
#[derive(Debug, Error)]
pub enum TransportError {
    /// A sender or recipient address could not be parsed
    #[error("invalid email address")]
    InvalidAddress(#[from] AddressError),

    /// The message could not be built
    #[error("could not build message")]
    Message(#[from] MessageError),

    /// The SMTP exchange failed
    #[error(transparent)]
    Smtp(#[from] smtp::Error),

    /// The server did not accept the connection test
    #[error("mail server at {host}:{port} did not accept the connection")]
    VerificationFailed {
        /// Host that was checked
        host: String,
        /// Port that was checked
        port: u16,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
