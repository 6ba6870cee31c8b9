//! Logout and session revocation

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::blacklist::BlacklistEntry;
use crate::domain::entities::token::RevocationReason;
use crate::errors::DomainError;
use crate::repositories::{BlacklistRepository, IdentityRepository, TokenRepository};

use super::hasher::hash_secret;
use super::service::TokenService;

impl<T, B, I> TokenService<T, B, I>
where
    T: TokenRepository,
    B: BlacklistRepository,
    I: IdentityRepository,
{
    /// Logs out one session
    ///
    /// Revokes the refresh token with reason `user_logout`. An unknown or
    /// already revoked secret is not an error, so logout can be retried.
    /// When the caller also hands over its access token and the token's
    /// signature verifies, its `jti` is blacklisted until the token's own
    /// expiry. Blacklisting is best effort: a failure is logged and the
    /// logout still succeeds.
    ///
    /// # Arguments
    ///
    /// * `refresh_secret` - Raw refresh secret of the session
    /// * `access_token` - Optional access token to invalidate immediately
    pub async fn logout(
        &self,
        refresh_secret: &str,
        access_token: Option<&str>,
    ) -> Result<(), DomainError> {
        if refresh_secret.is_empty() {
            return Err(DomainError::invalid_input("refresh token must not be empty"));
        }

        let now = self.now();
        let token_hash = hash_secret(refresh_secret);

        let revoked = self
            .with_deadline(
                "revoke_token",
                self.tokens
                    .revoke_token(&token_hash, RevocationReason::UserLogout, now),
            )
            .await?;

        if revoked {
            info!("Refresh token revoked at logout");
        } else {
            debug!("Logout with unknown or already revoked refresh token");
        }

        if let Some(access_token) = access_token {
            self.blacklist_at_logout(access_token, now).await;
        }

        Ok(())
    }

    async fn blacklist_at_logout(&self, access_token: &str, now: DateTime<Utc>) {
        let claims = match self.decode_access_token(access_token) {
            Ok(claims) => claims,
            Err(_) => {
                warn!("Access token presented at logout failed verification, not blacklisted");
                return;
            }
        };

        if claims.is_expired_at(now) {
            debug!(jti = %claims.jti, "Access token already expired, not blacklisted");
            return;
        }

        let Some(entry) = BlacklistEntry::from_claims(&claims, RevocationReason::UserLogout, now)
        else {
            warn!(jti = %claims.jti, "Access token claims unusable for blacklisting");
            return;
        };

        let jti = entry.jti.clone();
        let user_id = entry.user_id;

        match self
            .with_deadline("blacklist_token", self.blacklist.blacklist_token(entry))
            .await
        {
            Ok(()) => info!(user_id = %user_id, jti = %jti, "Access token blacklisted"),
            Err(e) => warn!(
                user_id = %user_id,
                jti = %jti,
                error = %e,
                "Failed to blacklist access token at logout"
            ),
        }
    }

    /// Revokes every session of a user
    ///
    /// Outstanding access tokens are not blacklisted; they stay usable until
    /// their natural expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of sessions revoked by this call
    pub async fn logout_all_devices(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.revoke_all_sessions(user_id, RevocationReason::LogoutAllDevices)
            .await
    }

    /// Revokes every session of a user with an explicit reason
    ///
    /// Used by the password change and account deletion flows. Only the
    /// bulk reasons (`password_changed`, `user_deleted`,
    /// `logout_all_devices`) are accepted.
    pub async fn revoke_all_sessions(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
    ) -> Result<usize, DomainError> {
        if !reason.is_bulk_reason() {
            return Err(DomainError::invalid_input(format!(
                "{} is not a bulk revocation reason",
                reason
            )));
        }

        let now = self.now();
        let count = self
            .with_deadline(
                "revoke_all_user_tokens",
                self.tokens.revoke_all_user_tokens(user_id, reason, now),
            )
            .await?;

        info!(user_id = %user_id, reason = %reason, count, "Revoked all sessions");
        Ok(count)
    }

    /// Revokes one session, only if it belongs to `user_id`
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if the session does not exist, belongs to
    /// another user, or is no longer valid.
    pub async fn revoke_session(&self, user_id: Uuid, session_id: Uuid) -> Result<(), DomainError> {
        let now = self.now();
        let revoked = self
            .with_deadline(
                "revoke_session",
                self.tokens
                    .revoke_session(session_id, user_id, RevocationReason::ManualRevoke, now),
            )
            .await?;

        if !revoked {
            debug!(user_id = %user_id, session_id = %session_id, "Session to revoke not found");
            return Err(DomainError::NotFound {
                resource: format!("session {}", session_id),
            });
        }

        info!(user_id = %user_id, session_id = %session_id, "Session revoked");
        Ok(())
    }
}
