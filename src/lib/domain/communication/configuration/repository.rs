//! Config store module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    configuration::{ConfigType, MailConfiguration, ScopeId},
    errors::StoreError,
};

/// Config store
#[async_trait]
pub trait ConfigStore: Clone + Send + Sync + 'static {
    /// Find the most specific configuration of `config_type` for `scope`.
    ///
    /// A record scoped to `scope` takes precedence over the global record. Returns
    /// [`None`] when neither exists.
    async fn find_config<'a>(
        &self,
        config_type: ConfigType,
        scope: Option<&'a ScopeId>,
    ) -> Result<Option<MailConfiguration>, StoreError>;
}

#[cfg(test)]
mock! {
    pub ConfigStore {}

    impl Clone for ConfigStore {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ConfigStore for ConfigStore {
        async fn find_config<'a>(
            &self,
            config_type: ConfigType,
            scope: Option<&'a ScopeId>,
        ) -> Result<Option<MailConfiguration>, StoreError>;
    }
}
