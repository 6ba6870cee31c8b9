//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, RevocationReason};
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are keyed by the digest of the raw secret. A digest is written
/// once and its record only ever moves from unrevoked to revoked, so every
/// mutation here is a conditional update on a single record (or on the
/// records of a single user) rather than a read followed by a write.
///
/// Time-dependent predicates take `now` from the caller so that an injected
/// clock governs validity in every implementation.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate digest)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use uuid::Uuid;
    /// # use ak_core::repositories::token::TokenRepository;
    /// # use ak_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::issue(Uuid::new_v4(), "digest".to_string(), None, None, Utc::now());
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Session created: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its digest, regardless of state
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token with this digest
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a refresh token by its id, regardless of state
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all valid (unrevoked, unexpired at `now`) tokens of a user
    ///
    /// Ordered newest first: `created_at` descending, then `id` descending.
    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError>;

    /// Revoke a token by digest if it is not already revoked
    ///
    /// Expired records are revoked as well.
    ///
    /// # Returns
    /// * `Ok(true)` - This call revoked the token
    /// * `Ok(false)` - No unrevoked token with this digest
    async fn revoke_token(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Revoke a token by digest only if it is still valid at `now`
    ///
    /// This is the single conditional update used to claim a refresh token
    /// for rotation: of several concurrent callers presenting the same
    /// secret, exactly one observes `Ok(true)`.
    async fn revoke_if_valid(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Revoke one valid session, only if it belongs to `user_id`
    ///
    /// # Returns
    /// * `Ok(true)` - The session was revoked
    /// * `Ok(false)` - No valid session with this id owned by this user
    async fn revoke_session(
        &self,
        id: Uuid,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Revoke every unrevoked token of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens revoked by this call
    async fn revoke_all_user_tokens(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError>;

    /// Count valid tokens of a user at `now`
    async fn count_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let tokens = self.find_active_by_user(user_id, now).await?;
        Ok(tokens.len())
    }
}
