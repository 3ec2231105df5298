//! Link code resolver

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    auth::users::User,
    communication::{
        email_addresses::EmailAddress,
        link_codes::{CodeIssuer, LinkCodeError},
        purposes::EmailPurpose,
    },
};

/// How the code for a purpose is obtained
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkCodeStrategy {
    /// Reset code keyed by the user's identity
    ResetCodeForUser,

    /// Invite code keyed by the recipient address
    InviteCodeForEmail,
}

/// Purposes that carry a link code. Purposes not listed here get no code.
const LINK_CODE_STRATEGIES: &[(EmailPurpose, LinkCodeStrategy)] = &[
    (
        EmailPurpose::PasswordRecovery,
        LinkCodeStrategy::ResetCodeForUser,
    ),
    (
        EmailPurpose::Invitation,
        LinkCodeStrategy::InviteCodeForEmail,
    ),
];

impl LinkCodeStrategy {
    /// The strategy registered for `purpose`
    pub fn for_purpose(purpose: EmailPurpose) -> Option<Self> {
        LINK_CODE_STRATEGIES
            .iter()
            .find(|(candidate, _)| *candidate == purpose)
            .map(|(_, strategy)| *strategy)
    }

    /// Whether the strategy needs a user record
    pub fn requires_user(&self) -> bool {
        matches!(self, Self::ResetCodeForUser)
    }

    /// Whether resolving a code for `purpose` needs a user record
    pub fn purpose_requires_user(purpose: EmailPurpose) -> bool {
        Self::for_purpose(purpose).is_some_and(|strategy| strategy.requires_user())
    }
}

/// Produces the one-time code, if any, for an email purpose
#[derive(Debug, Clone)]
pub struct LinkCodeResolver<I>
where
    I: CodeIssuer,
{
    issuer: Arc<I>,
}

impl<I> LinkCodeResolver<I>
where
    I: CodeIssuer,
{
    /// Creates a new link code resolver
    pub fn new(issuer: Arc<I>) -> Self {
        Self { issuer }
    }

    /// Returns the code for `purpose`, or [`None`] when the purpose carries no code.
    pub async fn resolve(
        &self,
        purpose: EmailPurpose,
        email: &EmailAddress,
        user: Option<&User>,
    ) -> Result<Option<String>, LinkCodeError> {
        let Some(strategy) = LinkCodeStrategy::for_purpose(purpose) else {
            return Ok(None);
        };

        debug!(%purpose, ?strategy, "resolving link code");

        let code = match strategy {
            LinkCodeStrategy::ResetCodeForUser => {
                let user = user.ok_or(LinkCodeError::MissingUser(purpose))?;

                self.issuer.issue_or_fetch_reset_code(&user.id).await?
            }
            LinkCodeStrategy::InviteCodeForEmail => {
                self.issuer.issue_or_fetch_invite_code(email).await?
            }
        };

        Ok(Some(code))
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::domain::communication::link_codes::tests::MockCodeIssuer;

    use super::*;

    #[tokio::test]
    async fn test_password_recovery_uses_user_identity() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;
        let user = User::new(Uuid::now_v7(), email.clone(), None);

        let mut issuer = MockCodeIssuer::new();

        issuer
            .expect_issue_or_fetch_reset_code()
            .times(1)
            .with(eq(user.id))
            .returning(|_| Ok("reset-code".to_string()));
        issuer.expect_issue_or_fetch_invite_code().times(0);

        let resolver = LinkCodeResolver::new(Arc::new(issuer));

        let code = resolver
            .resolve(EmailPurpose::PasswordRecovery, &email, Some(&user))
            .await?;

        assert_eq!(code.as_deref(), Some("reset-code"));

        Ok(())
    }

    #[tokio::test]
    async fn test_password_recovery_without_user_fails_fast() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        let mut issuer = MockCodeIssuer::new();

        issuer.expect_issue_or_fetch_reset_code().times(0);

        let resolver = LinkCodeResolver::new(Arc::new(issuer));

        let result = resolver
            .resolve(EmailPurpose::PasswordRecovery, &email, None)
            .await;

        assert!(matches!(
            result,
            Err(LinkCodeError::MissingUser(EmailPurpose::PasswordRecovery))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_invitation_uses_email_address() -> TestResult {
        let email = EmailAddress::new("invitee@example.com")?;

        let mut issuer = MockCodeIssuer::new();

        issuer
            .expect_issue_or_fetch_invite_code()
            .times(1)
            .with(eq(email.clone()))
            .returning(|_| Ok("invite-code".to_string()));

        let resolver = LinkCodeResolver::new(Arc::new(issuer));

        let code = resolver
            .resolve(EmailPurpose::Invitation, &email, None)
            .await?;

        assert_eq!(code.as_deref(), Some("invite-code"));

        Ok(())
    }

    #[tokio::test]
    async fn test_welcome_has_no_code() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        let mut issuer = MockCodeIssuer::new();

        issuer.expect_issue_or_fetch_reset_code().times(0);
        issuer.expect_issue_or_fetch_invite_code().times(0);

        let resolver = LinkCodeResolver::new(Arc::new(issuer));

        let code = resolver.resolve(EmailPurpose::Welcome, &email, None).await?;

        assert_eq!(code, None);

        Ok(())
    }

    #[test]
    fn test_strategy_table() {
        assert_eq!(
            LinkCodeStrategy::for_purpose(EmailPurpose::PasswordRecovery),
            Some(LinkCodeStrategy::ResetCodeForUser)
        );
        assert_eq!(
            LinkCodeStrategy::for_purpose(EmailPurpose::Invitation),
            Some(LinkCodeStrategy::InviteCodeForEmail)
        );
        assert_eq!(LinkCodeStrategy::for_purpose(EmailPurpose::Base), None);
    }

    #[test]
    fn test_only_password_recovery_requires_user() {
        assert!(LinkCodeStrategy::purpose_requires_user(
            EmailPurpose::PasswordRecovery
        ));
        assert!(!LinkCodeStrategy::purpose_requires_user(
            EmailPurpose::Invitation
        ));
        assert!(!LinkCodeStrategy::purpose_requires_user(
            EmailPurpose::Welcome
        ));
    }
}
