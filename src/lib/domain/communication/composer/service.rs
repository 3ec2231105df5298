//! Email composer service

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    auth::users::User,
    communication::{
        composer::{ComposeEmailError, ComposerSettings},
        email_addresses::EmailAddress,
        link_codes::{CodeIssuer, LinkCodeResolver, LinkCodeStrategy},
        purposes::EmailPurpose,
        templates::{SubstitutionContext, SubstitutionEngine, TemplateSetResolver, TemplateStore},
    },
};

/// Email composer
#[async_trait]
pub trait EmailComposer: Clone + Send + Sync + 'static {
    /// Composes the HTML document for an email.
    ///
    /// # Arguments
    /// * `purpose` - Why the email is sent; must be one of the full purposes.
    /// * `email` - The recipient address.
    /// * `user` - The recipient's user record, if known.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the rendered HTML, or an [`Err`]
    /// containing a [`ComposeEmailError`] if the purpose is not composable, a template
    /// fragment is missing, or rendering fails.
    async fn compose_email<'a>(
        &self,
        purpose: EmailPurpose,
        email: &EmailAddress,
        user: Option<&'a User>,
    ) -> Result<String, ComposeEmailError>;
}

#[cfg(test)]
mock! {
    pub EmailComposer {}

    impl Clone for EmailComposer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl EmailComposer for EmailComposer {
        async fn compose_email<'a>(
            &self,
            purpose: EmailPurpose,
            email: &EmailAddress,
            user: Option<&'a User>,
        ) -> Result<String, ComposeEmailError>;
    }
}

/// Email composer implementation
#[derive(Debug, Clone)]
pub struct EmailComposerImpl<T, I, E>
where
    T: TemplateStore,
    I: CodeIssuer,
    E: SubstitutionEngine,
{
    templates: TemplateSetResolver<T>,
    link_codes: LinkCodeResolver<I>,
    engine: Arc<E>,
    settings: ComposerSettings,
}

impl<T, I, E> EmailComposerImpl<T, I, E>
where
    T: TemplateStore,
    I: CodeIssuer,
    E: SubstitutionEngine,
{
    /// Creates a new email composer
    pub fn new(
        templates: Arc<T>,
        issuer: Arc<I>,
        engine: Arc<E>,
        settings: ComposerSettings,
    ) -> Self {
        Self {
            templates: TemplateSetResolver::new(templates),
            link_codes: LinkCodeResolver::new(issuer),
            engine,
            settings,
        }
    }

    fn build_context(
        &self,
        code: Option<String>,
        email: &EmailAddress,
        user: Option<&User>,
    ) -> Result<SubstitutionContext, ComposeEmailError> {
        let mut context = SubstitutionContext::new();

        context.insert("app_name", self.settings.app_name.as_str());
        context.insert("base_url", self.settings.base_url.as_str());
        context.insert("code", code.map_or(Value::Null, Value::String));

        let user = match user {
            Some(user) => serde_json::to_value(user).map_err(anyhow::Error::from)?,
            None => Value::Object(Map::new()),
        };

        context.insert("email", email.as_str());
        context.insert("user", user);

        Ok(context)
    }
}

#[async_trait]
impl<T, I, E> EmailComposer for EmailComposerImpl<T, I, E>
where
    T: TemplateStore,
    I: CodeIssuer,
    E: SubstitutionEngine,
{
    async fn compose_email<'a>(
        &self,
        purpose: EmailPurpose,
        email: &EmailAddress,
        user: Option<&'a User>,
    ) -> Result<String, ComposeEmailError> {
        if !purpose.is_full() {
            return Err(ComposeEmailError::UnsupportedPurpose(purpose));
        }

        if user.is_none() && LinkCodeStrategy::purpose_requires_user(purpose) {
            return Err(ComposeEmailError::MissingUser(purpose));
        }

        let (templates, code) = tokio::try_join!(
            async {
                self.templates
                    .resolve(purpose)
                    .await
                    .map_err(ComposeEmailError::from)
            },
            async {
                self.link_codes
                    .resolve(purpose, email, user)
                    .await
                    .map_err(ComposeEmailError::from)
            },
        )?;

        let context = self.build_context(code, email, user)?;

        // base is the only fragment that may see the rendered styles and body
        let body = self.engine.render(&templates.body.contents, &context)?;
        let styles = self.engine.render(&templates.styles.contents, &context)?;
        let document = self
            .engine
            .render(&templates.base.contents, &context.with_rendered(&styles, &body))?;

        debug!(%purpose, bytes = document.len(), "composed email document");

        Ok(document)
    }
}
