//! Postgres implementation of the CodeIssuer trait

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use sqlx::{query, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::communication::{
        email_addresses::EmailAddress, errors::StoreError, link_codes::CodeIssuer,
        purposes::EmailPurpose,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

/// How long an issued code stays valid
const LINK_CODE_LIFETIME_HOURS: i64 = 24;

fn generate_code(subject: &str) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();

    let data = format!("{}{}{}", subject, salt, Utc::now().timestamp());
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());

    URL_SAFE.encode(hasher.finalize())
}

/// Advisory lock key serializing issuance for one purpose and subject
fn issuance_lock_key(purpose: EmailPurpose, subject: &str) -> i64 {
    let mut hasher = Sha256::new();
    hasher.update(purpose.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(subject.as_bytes());

    let digest = hasher.finalize();
    let mut key = [0u8; 8];
    key.copy_from_slice(&digest[..8]);

    i64::from_be_bytes(key)
}

impl PostgresDatabase {
    #[mutants::skip]
    async fn issue_or_fetch_code(
        &self,
        purpose: EmailPurpose,
        subject: &str,
    ) -> Result<String, StoreError> {
        let mut tx = self.pool.begin().await?;

        // held until commit, so concurrent first-time callers see one insert
        query("SELECT pg_advisory_xact_lock($1)")
            .bind(issuance_lock_key(purpose, subject))
            .execute(&mut *tx)
            .await?;

        let existing = query_scalar::<_, String>(
            r#"
            SELECT code
            FROM link_codes
            WHERE purpose = $1 AND subject = $2 AND expires_at > now()
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(purpose.as_str())
        .bind(subject)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(code) = existing {
            debug!(%purpose, "reusing outstanding link code");
            tx.commit().await?;
            return Ok(code);
        }

        let code = generate_code(subject);

        query(
            r#"
            INSERT INTO link_codes (id, purpose, subject, code, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(purpose.as_str())
        .bind(subject)
        .bind(&code)
        .bind(Utc::now() + Duration::hours(LINK_CODE_LIFETIME_HOURS))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(%purpose, "issued new link code");

        Ok(code)
    }
}

#[async_trait]
impl CodeIssuer for PostgresDatabase {
    async fn issue_or_fetch_reset_code(&self, user_id: &Uuid) -> Result<String, StoreError> {
        self.issue_or_fetch_code(EmailPurpose::PasswordRecovery, &user_id.to_string())
            .await
    }

    async fn issue_or_fetch_invite_code(
        &self,
        email: &EmailAddress,
    ) -> Result<String, StoreError> {
        self.issue_or_fetch_code(EmailPurpose::Invitation, email.as_str())
            .await
    }
}
