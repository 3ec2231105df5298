//! Postgres implementation of the UserRepository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query_as, Error::RowNotFound, FromRow};
use uuid::Uuid;

use crate::{
    domain::{
        auth::users::{errors::GetUserByIdError, User, UserRepository},
        communication::email_addresses::EmailAddress,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            email: EmailAddress::new_unchecked(&record.email),
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_user_by_id(&self, id: &Uuid) -> Result<User, GetUserByIdError> {
        let record = query_as::<_, UserRecord>(
            r#"
            SELECT id, email, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetUserByIdError::UserNotFound(*id),
            _ => err.into(),
        })?;

        Ok(record.into())
    }
}
