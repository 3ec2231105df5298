//! Handlebars substitution engine
//!
//! Runs in non-strict mode: missing values render as empty strings and extra context
//! keys are ignored. `{{value}}` is HTML-escaped, `{{{value}}}` is inserted verbatim,
//! which is how base templates embed the rendered `styles` and `body`.

use std::{fmt, sync::Arc};

use handlebars::Handlebars;
use tracing::debug;

use crate::domain::communication::templates::{
    RenderTemplateError, SubstitutionContext, SubstitutionEngine,
};

/// Handlebars-backed [`SubstitutionEngine`]
#[derive(Clone)]
pub struct HandlebarsRenderer {
    handlebars: Arc<Handlebars<'static>>,
}

impl HandlebarsRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        Self {
            handlebars: Arc::new(handlebars),
        }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("strict_mode", &self.handlebars.strict_mode())
            .finish()
    }
}

impl SubstitutionEngine for HandlebarsRenderer {
    fn render(
        &self,
        template: &str,
        context: &SubstitutionContext,
    ) -> Result<String, RenderTemplateError> {
        self.handlebars
            .render_template(template, context)
            .map_err(|err| {
                debug!("handlebars render error: {}", err);
                RenderTemplateError(err.to_string())
            })
    }
}
