//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh token records live in `refresh_tokens`, keyed by the digest of
//! the raw secret. Every revocation is a single conditional `UPDATE` whose
//! `rows_affected` decides the outcome, so concurrent callers racing on the
//! same record cannot both win.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::token::{RefreshToken, RevocationReason};
use ak_core::errors::DomainError;
use ak_core::repositories::TokenRepository;

use super::storage_error;

const TOKEN_COLUMNS: &str = "id, user_id, token_hash, created_at, expires_at, \
     revoked_at, revoked_reason, device_label, origin_address";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| storage_error("Failed to get user_id", e))?;
        let revoked_reason: Option<String> = row
            .try_get("revoked_reason")
            .map_err(|e| storage_error("Failed to get revoked_reason", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("Invalid token UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::storage(format!("Invalid user UUID: {}", e)))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| storage_error("Failed to get token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| storage_error("Failed to get created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| storage_error("Failed to get expires_at", e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| storage_error("Failed to get revoked_at", e))?,
            revoked_reason: revoked_reason
                .map(|reason| reason.parse::<RevocationReason>())
                .transpose()
                .map_err(DomainError::storage)?,
            device_label: row
                .try_get("device_label")
                .map_err(|e| storage_error("Failed to get device_label", e))?,
            origin_address: row
                .try_get("origin_address")
                .map_err(|e| storage_error("Failed to get origin_address", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at,
                revoked_at, revoked_reason, device_label, origin_address
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.revoked_at)
            .bind(token.revoked_reason.map(|reason| reason.as_str()))
            .bind(&token.device_label)
            .bind(&token.origin_address)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if duplicate {
                    DomainError::storage("Token already exists")
                } else {
                    storage_error("Failed to save refresh token", e)
                }
            })?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find refresh token", e))?;

        result.map(|row| Self::row_to_token(&row)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE id = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find token by id", e))?;

        result.map(|row| Self::row_to_token(&row)).transpose()
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM refresh_tokens
            WHERE user_id = ?
                AND revoked_at IS NULL
                AND expires_at > ?
            ORDER BY created_at DESC, id DESC
            "#,
            TOKEN_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn revoke_token(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?, revoked_reason = ?
            WHERE token_hash = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(reason.as_str())
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_if_valid(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?, revoked_reason = ?
            WHERE token_hash = ? AND revoked_at IS NULL AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(reason.as_str())
            .bind(token_hash)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to claim refresh token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_session(
        &self,
        id: Uuid,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?, revoked_reason = ?
            WHERE id = ? AND user_id = ? AND revoked_at IS NULL AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(reason.as_str())
            .bind(id.to_string())
            .bind(user_id.to_string())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_user_tokens(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?, revoked_reason = ?
            WHERE user_id = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(reason.as_str())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS active
            FROM refresh_tokens
            WHERE user_id = ? AND revoked_at IS NULL AND expires_at > ?
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count user tokens", e))?;

        let count: i64 = row
            .try_get("active")
            .map_err(|e| storage_error("Failed to get active count", e))?;

        Ok(count.max(0) as usize)
    }
}
