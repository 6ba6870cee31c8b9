//! MySQL implementation of the BlacklistRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use ak_core::domain::entities::blacklist::BlacklistEntry;
use ak_core::errors::DomainError;
use ak_core::repositories::BlacklistRepository;

use super::storage_error;

/// MySQL implementation of BlacklistRepository backed by `token_blacklist`
pub struct MySqlBlacklistRepository {
    pool: MySqlPool,
}

impl MySqlBlacklistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlacklistRepository for MySqlBlacklistRepository {
    async fn blacklist_token(&self, entry: BlacklistEntry) -> Result<(), DomainError> {
        // A repeated jti keeps its original row and expiry
        let query = r#"
            INSERT INTO token_blacklist (jti, user_id, expires_at, reason, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE jti = jti
        "#;

        sqlx::query(query)
            .bind(&entry.jti)
            .bind(entry.user_id.to_string())
            .bind(entry.expires_at)
            .bind(entry.reason.as_str())
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to blacklist token", e))?;

        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            SELECT 1
            FROM token_blacklist
            WHERE jti = ? AND expires_at > ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(jti)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check token blacklist", e))?;

        Ok(row.is_some())
    }
}
