//! Code issuer module

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{email_addresses::EmailAddress, errors::StoreError};

/// Issues one-time codes, or returns the one already outstanding
#[async_trait]
pub trait CodeIssuer: Clone + Send + Sync + 'static {
    /// Password reset code for a user
    async fn issue_or_fetch_reset_code(&self, user_id: &Uuid) -> Result<String, StoreError>;

    /// Invitation code for an email address
    async fn issue_or_fetch_invite_code(&self, email: &EmailAddress)
        -> Result<String, StoreError>;
}

#[cfg(test)]
mock! {
    pub CodeIssuer {}

    impl Clone for CodeIssuer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl CodeIssuer for CodeIssuer {
        async fn issue_or_fetch_reset_code(&self, user_id: &Uuid) -> Result<String, StoreError>;
        async fn issue_or_fetch_invite_code(&self, email: &EmailAddress) -> Result<String, StoreError>;
    }
}
