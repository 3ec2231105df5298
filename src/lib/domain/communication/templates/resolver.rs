//! Template set resolver

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::communication::{
    purposes::{EmailPurpose, TemplateCategory},
    templates::{TemplateFragment, TemplateSet, TemplateSetError, TemplateStore},
};

/// Fetches the base, styles and body fragments for an email purpose
#[derive(Debug, Clone)]
pub struct TemplateSetResolver<T>
where
    T: TemplateStore,
{
    store: Arc<T>,
}

impl<T> TemplateSetResolver<T>
where
    T: TemplateStore,
{
    /// Creates a new template set resolver
    pub fn new(store: Arc<T>) -> Self {
        Self { store }
    }

    /// Looks up all three fragments concurrently. Every fragment must be present.
    pub async fn resolve(&self, purpose: EmailPurpose) -> Result<TemplateSet, TemplateSetError> {
        let (base, styles, body) = tokio::try_join!(
            self.store
                .find_template(TemplateCategory::Email, EmailPurpose::Base),
            self.store
                .find_template(TemplateCategory::Email, EmailPurpose::Styles),
            self.store.find_template(TemplateCategory::Email, purpose),
        )?;

        match (base, styles, body) {
            (Some(base), Some(styles), Some(body)) => {
                debug!(%purpose, "resolved template set");

                Ok(TemplateSet { base, styles, body })
            }
            (base, styles, body) => {
                let missing = missing_components(purpose, &base, &styles, &body);

                warn!(%purpose, ?missing, "missing base components");

                Err(TemplateSetError::MissingBaseComponents(missing))
            }
        }
    }
}

fn missing_components(
    purpose: EmailPurpose,
    base: &Option<TemplateFragment>,
    styles: &Option<TemplateFragment>,
    body: &Option<TemplateFragment>,
) -> Vec<EmailPurpose> {
    [
        (EmailPurpose::Base, base.is_none()),
        (EmailPurpose::Styles, styles.is_none()),
        (purpose, body.is_none()),
    ]
    .into_iter()
    .filter_map(|(purpose, missing)| missing.then_some(purpose))
    .collect()
}
