//! Configuration resolver

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::communication::{
    configuration::{ConfigStore, ConfigType, MailConfiguration, ScopeId},
    errors::StoreError,
};

/// Resolves the SMTP configuration that applies to a scope
#[derive(Debug, Clone)]
pub struct ConfigResolver<C>
where
    C: ConfigStore,
{
    store: Arc<C>,
}

impl<C> ConfigResolver<C>
where
    C: ConfigStore,
{
    /// Creates a new configuration resolver
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Returns the store's best match for `scope`, or [`None`] if nothing is configured.
    pub async fn resolve(
        &self,
        scope: Option<&ScopeId>,
    ) -> Result<Option<MailConfiguration>, StoreError> {
        let config = self.store.find_config(ConfigType::Smtp, scope).await?;

        debug!(
            scope = scope.map(ScopeId::as_str),
            found = config.is_some(),
            "resolved mail configuration"
        );

        Ok(config)
    }

    /// Whether a configuration exists for `scope`. Store failures count as "not configured".
    pub async fn is_configured(&self, scope: Option<&ScopeId>) -> bool {
        match self.resolve(scope).await {
            Ok(config) => config.is_some(),
            Err(err) => {
                warn!("could not look up mail configuration: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::configuration::tests::MockConfigStore;

    use super::*;

    fn config(scope: Option<&str>, host: &str) -> MailConfiguration {
        MailConfiguration {
            scope: scope.map(ScopeId::new),
            host: host.to_string(),
            port: 587,
            secure: false,
            self_signed: false,
            auth: None,
            from: "noreply@example.com".to_string(),
            subject: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolve_forwards_scope_filter() -> TestResult {
        let mut store = MockConfigStore::new();

        store
            .expect_find_config()
            .times(1)
            .withf(|config_type, scope| {
                *config_type == ConfigType::Smtp && scope.map(ScopeId::as_str) == Some("group-1")
            })
            .returning(|_, _| Ok(Some(config(Some("group-1"), "group.example.com"))));

        let resolver = ConfigResolver::new(Arc::new(store));
        let scope = ScopeId::new("group-1");

        let resolved = resolver.resolve(Some(&scope)).await?;

        assert_eq!(resolved.map(|c| c.host), Some("group.example.com".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_without_scope_asks_for_global() -> TestResult {
        let mut store = MockConfigStore::new();

        store
            .expect_find_config()
            .times(1)
            .withf(|_, scope| scope.is_none())
            .returning(|_, _| Ok(Some(config(None, "global.example.com"))));

        let resolver = ConfigResolver::new(Arc::new(store));

        let resolved = resolver.resolve(None).await?;

        assert_eq!(resolved.and_then(|c| c.scope), None);

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_errors() {
        let mut store = MockConfigStore::new();

        store
            .expect_find_config()
            .times(1)
            .returning(|_, _| Err(StoreError::UnknownError(anyhow!("connection reset"))));

        let resolver = ConfigResolver::new(Arc::new(store));

        let result = resolver.resolve(None).await;

        assert!(matches!(result, Err(StoreError::UnknownError(_))));
    }

    #[tokio::test]
    async fn test_is_configured() {
        let mut store = MockConfigStore::new();

        store
            .expect_find_config()
            .times(1)
            .returning(|_, _| Ok(Some(config(None, "global.example.com"))));

        let resolver = ConfigResolver::new(Arc::new(store));

        assert!(resolver.is_configured(None).await);
    }

    #[tokio::test]
    async fn test_is_configured_false_when_absent() {
        let mut store = MockConfigStore::new();

        store.expect_find_config().times(1).returning(|_, _| Ok(None));

        let resolver = ConfigResolver::new(Arc::new(store));

        assert!(!resolver.is_configured(Some(&ScopeId::new("nobody"))).await);
    }

    #[tokio::test]
    async fn test_is_configured_never_fails() {
        let mut store = MockConfigStore::new();

        store
            .expect_find_config()
            .times(1)
            .returning(|_, _| Err(StoreError::UnknownError(anyhow!("timeout"))));

        let resolver = ConfigResolver::new(Arc::new(store));

        assert!(!resolver.is_configured(None).await);
    }
}
