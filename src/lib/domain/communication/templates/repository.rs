//! Template store module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    errors::StoreError,
    purposes::{EmailPurpose, TemplateCategory},
    templates::TemplateFragment,
};

/// Template store
#[async_trait]
pub trait TemplateStore: Clone + Send + Sync + 'static {
    /// Find the fragment configured for `category` and `purpose`, if any
    async fn find_template(
        &self,
        category: TemplateCategory,
        purpose: EmailPurpose,
    ) -> Result<Option<TemplateFragment>, StoreError>;
}

#[cfg(test)]
mock! {
    pub TemplateStore {}

    impl Clone for TemplateStore {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TemplateStore for TemplateStore {
        async fn find_template(
            &self,
            category: TemplateCategory,
            purpose: EmailPurpose,
        ) -> Result<Option<TemplateFragment>, StoreError>;
    }
}
