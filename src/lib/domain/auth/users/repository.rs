//! User repository module

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::users::{errors::GetUserByIdError, User};

/// User repository
#[async_trait]
pub trait UserRepository: Clone + Send + Sync + 'static {
    /// Get a user by their ID
    async fn get_user_by_id(&self, id: &Uuid) -> Result<User, GetUserByIdError>;
}
