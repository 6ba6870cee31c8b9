//! MySQL implementation of the IdentityRepository trait.
//!
//! Reads `id` and `role` from the `users` table owned by the account
//! service. This crate never writes to that table.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::identity::UserIdentity;
use ak_core::errors::DomainError;
use ak_core::repositories::IdentityRepository;

use super::storage_error;

pub struct MySqlIdentityRepository {
    pool: MySqlPool,
}

impl MySqlIdentityRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for MySqlIdentityRepository {
    async fn find_identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError> {
        let query = "SELECT role FROM users WHERE id = ? LIMIT 1";

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user identity", e))?;

        match row {
            Some(row) => {
                let role: String = row
                    .try_get("role")
                    .map_err(|e| storage_error("Failed to get role", e))?;
                Ok(Some(UserIdentity::new(user_id, role)))
            }
            None => Ok(None),
        }
    }
}
