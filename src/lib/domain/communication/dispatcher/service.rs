//! Mail dispatcher service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{
    auth::users::User,
    communication::{
        composer::EmailComposer,
        configuration::{ConfigResolver, ConfigStore, MailConfiguration, ScopeId},
        dispatcher::{ConfigVerifier, SendEmailError},
        email_addresses::EmailAddress,
        mailer::{DeliveryReceipt, MailTransport, OutgoingMessage, TransportError, TransportSession},
        purposes::EmailPurpose,
    },
};

/// Optional inputs to [`MailDispatcher::send_email`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Tenant or group whose mail configuration should be used
    pub scope: Option<ScopeId>,

    /// The recipient's user record
    pub user: Option<User>,
}

/// Mail dispatcher
#[async_trait]
pub trait MailDispatcher: Clone + Send + Sync + 'static {
    /// Whether a mail configuration exists for `scope`. Never fails.
    async fn is_email_configured<'a>(&self, scope: Option<&'a ScopeId>) -> bool;

    /// Composes and sends an email.
    ///
    /// # Arguments
    /// * `email` - The recipient address.
    /// * `purpose` - Why the email is sent.
    /// * `options` - Optional scope and user record.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the transport's [`DeliveryReceipt`],
    /// or an [`Err`] containing a [`SendEmailError`] if no configuration exists for the
    /// scope, composition fails, or the transport fails.
    async fn send_email(
        &self,
        email: &EmailAddress,
        purpose: EmailPurpose,
        options: &SendOptions,
    ) -> Result<DeliveryReceipt, SendEmailError>;

    /// Checks that `config` can establish a working transport session.
    async fn verify_config(&self, config: &MailConfiguration) -> Result<(), TransportError>;
}

/// Mail dispatcher implementation
#[derive(Debug, Clone)]
pub struct MailDispatcherImpl<C, P, X>
where
    C: ConfigStore,
    P: EmailComposer,
    X: MailTransport,
{
    configs: ConfigResolver<C>,
    composer: Arc<P>,
    transport: Arc<X>,
    verifier: ConfigVerifier<X>,
}

impl<C, P, X> MailDispatcherImpl<C, P, X>
where
    C: ConfigStore,
    P: EmailComposer,
    X: MailTransport,
{
    /// Creates a new mail dispatcher
    pub fn new(configs: Arc<C>, composer: Arc<P>, transport: Arc<X>) -> Self {
        Self {
            configs: ConfigResolver::new(configs),
            composer,
            verifier: ConfigVerifier::new(transport.clone()),
            transport,
        }
    }
}

#[async_trait]
impl<C, P, X> MailDispatcher for MailDispatcherImpl<C, P, X>
where
    C: ConfigStore,
    P: EmailComposer,
    X: MailTransport,
{
    async fn is_email_configured<'a>(&self, scope: Option<&'a ScopeId>) -> bool {
        self.configs.is_configured(scope).await
    }

    async fn send_email(
        &self,
        email: &EmailAddress,
        purpose: EmailPurpose,
        options: &SendOptions,
    ) -> Result<DeliveryReceipt, SendEmailError> {
        let scope = options.scope.as_ref();

        let Some(config) = self.configs.resolve(scope).await? else {
            warn!(scope = scope.map(ScopeId::as_str), "email is not configured");
            return Err(SendEmailError::ConfigurationNotFound(scope.cloned()));
        };

        let html = self
            .composer
            .compose_email(purpose, email, options.user.as_ref())
            .await?;

        let session = self.transport.create_session(&config)?;

        let message = OutgoingMessage {
            from: config.from.clone(),
            to: email.clone(),
            subject: config.subject.clone(),
            html,
        };

        let receipt = session.send(&message).await?;

        info!(%purpose, code = %receipt.code, "sent email to {}", email);

        Ok(receipt)
    }

    async fn verify_config(&self, config: &MailConfiguration) -> Result<(), TransportError> {
        self.verifier.verify(config).await
    }
}
