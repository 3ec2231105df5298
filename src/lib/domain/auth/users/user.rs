//! User model

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::communication::email_addresses::EmailAddress;

/// User model
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    /// User UUID
    pub id: Uuid,

    /// User email address
    pub email: EmailAddress,

    /// User display name
    pub name: Option<String>,

    /// User created at date in UTC
    pub created_at: DateTime<Utc>,

    /// User last updated at date in UTC
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user record with the current time as its timestamps
    pub fn new(id: Uuid, email: EmailAddress, name: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            email,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}
