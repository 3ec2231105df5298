//! Template fragments

use serde::{Deserialize, Serialize};

/// Stored template content for one (category, purpose) pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFragment {
    /// Raw template text
    pub contents: String,
}

impl TemplateFragment {
    /// Create a fragment from raw template text
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

/// The three fragments that make up one email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSet {
    /// Document shell, rendered last with `styles` and `body` in context
    pub base: TemplateFragment,

    /// Shared styles
    pub styles: TemplateFragment,

    /// Purpose-specific body
    pub body: TemplateFragment,
}
