//! Postgres implementation of the ConfigStore trait

use async_trait::async_trait;
use sqlx::{query_as, FromRow};

use crate::{
    domain::communication::{
        configuration::{ConfigStore, ConfigType, MailConfiguration, ScopeId, SmtpCredentials},
        errors::StoreError,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct MailConfigurationRecord {
    scope: Option<String>,
    host: String,
    port: i32,
    secure: bool,
    self_signed: bool,
    username: Option<String>,
    password: Option<String>,
    from_address: String,
    subject: String,
}

impl TryFrom<MailConfigurationRecord> for MailConfiguration {
    type Error = StoreError;

    fn try_from(record: MailConfigurationRecord) -> Result<Self, Self::Error> {
        let port = u16::try_from(record.port)
            .map_err(|_| StoreError::InvalidRecord(format!("SMTP port {}", record.port)))?;

        let auth = match (record.username, record.password) {
            (Some(user), Some(pass)) => Some(SmtpCredentials { user, pass }),
            _ => None,
        };

        Ok(MailConfiguration {
            scope: record.scope.map(ScopeId::new),
            host: record.host,
            port,
            secure: record.secure,
            self_signed: record.self_signed,
            auth,
            from: record.from_address,
            subject: record.subject,
        })
    }
}

#[async_trait]
impl ConfigStore for PostgresDatabase {
    #[mutants::skip]
    async fn find_config<'a>(
        &self,
        config_type: ConfigType,
        scope: Option<&'a ScopeId>,
    ) -> Result<Option<MailConfiguration>, StoreError> {
        // scoped rows sort ahead of the global (NULL scope) row
        let record = query_as::<_, MailConfigurationRecord>(
            r#"
            SELECT scope, host, port, secure, self_signed, username, password, from_address, subject
            FROM mail_configurations
            WHERE config_type = $1
              AND (scope IS NULL OR scope = $2)
            ORDER BY scope IS NULL
            LIMIT 1
            "#,
        )
        .bind(config_type.as_str())
        .bind(scope.map(ScopeId::as_str))
        .fetch_optional(&self.pool)
        .await?;

        record.map(MailConfiguration::try_from).transpose()
    }
}
