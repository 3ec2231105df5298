//! Mail dispatch: configuration lookup, composition and submission

mod errors;
mod service;
mod verifier;

pub use errors::SendEmailError;
pub use service::{MailDispatcher, MailDispatcherImpl, SendOptions};
pub use verifier::ConfigVerifier;
