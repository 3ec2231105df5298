//! Substitution engine interface

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::templates::{RenderTemplateError, SubstitutionContext};

/// Renders template text against a substitution context.
///
/// Implementations must tolerate keys the template never references and must leave
/// placeholders without a value inert or empty rather than failing.
pub trait SubstitutionEngine: Clone + Send + Sync + 'static {
    /// Render `template` with the values in `context`
    fn render(
        &self,
        template: &str,
        context: &SubstitutionContext,
    ) -> Result<String, RenderTemplateError>;
}

#[cfg(test)]
mock! {
    pub SubstitutionEngine {}

    impl Clone for SubstitutionEngine {
        fn clone(&self) -> Self;
    }

    impl SubstitutionEngine for SubstitutionEngine {
        fn render(
            &self,
            template: &str,
            context: &SubstitutionContext,
        ) -> Result<String, RenderTemplateError>;
    }
}
