//! Template errors

use thiserror::Error;

use crate::domain::communication::{errors::StoreError, purposes::EmailPurpose};

/// Errors that can occur while resolving a template set
#[derive(Debug, Error)]
pub enum TemplateSetError {
    /// One or more of the base, styles and body fragments is not configured
    #[error("missing base components: {0:?}")]
    MissingBaseComponents(Vec<EmailPurpose>),

    /// The template store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The substitution engine could not render a fragment
#[derive(Debug, Error)]
#[error("could not render template: {0}")]
pub struct RenderTemplateError(pub String);
