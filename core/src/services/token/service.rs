//! Main token service implementation

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, RevocationReason, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{BlacklistRepository, IdentityRepository, TokenRepository};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::hasher::{generate_refresh_secret, hash_secret};

/// Service for issuing, rotating and revoking credentials
///
/// The service itself holds no mutable state; everything durable lives in
/// the token and blacklist stores. The operations are split across this
/// file (issuance, rotation), `revocation.rs`, `sessions.rs` and
/// `blacklist.rs`.
pub struct TokenService<T, B, I>
where
    T: TokenRepository,
    B: BlacklistRepository,
    I: IdentityRepository,
{
    pub(crate) tokens: T,
    pub(crate) blacklist: B,
    pub(crate) identities: I,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<T, B, I> TokenService<T, B, I>
where
    T: TokenRepository,
    B: BlacklistRepository,
    I: IdentityRepository,
{
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `tokens` - Refresh token store
    /// * `blacklist` - Access token blacklist store
    /// * `identities` - User lookup for the current role
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` on the system clock, or a configuration error
    pub fn new(
        tokens: T,
        blacklist: B,
        identities: I,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Time-based claims are checked against the injected clock instead
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Ok(Self {
            tokens,
            blacklist,
            identities,
            config,
            clock: Arc::new(SystemClock),
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Replaces the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issues a new access/refresh pair for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `role` - Role label stamped into the access token
    /// * `device_label` - Optional free-form label, truncated to 255 chars
    /// * `origin_address` - Optional client address, truncated to 64 chars
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Signed access token, raw refresh secret and the new session id
    /// * `Err(DomainError)` - Empty role, signing failure or storage failure
    pub async fn issue_pair(
        &self,
        user_id: Uuid,
        role: &str,
        device_label: Option<String>,
        origin_address: Option<String>,
    ) -> Result<TokenPair, DomainError> {
        if role.trim().is_empty() {
            return Err(DomainError::invalid_input("role must not be empty"));
        }

        let now = self.now();
        let claims =
            Claims::new_access_token(user_id, role, now, &self.config.issuer, &self.config.audience);
        let access_token = self.encode_access_token(&claims)?;
        let access_expires_at = claims.expires_at().ok_or(TokenError::SigningFailed)?;

        let refresh_secret = generate_refresh_secret();
        let record = RefreshToken::issue(
            user_id,
            hash_secret(&refresh_secret),
            device_label,
            origin_address,
            now,
        );

        let saved = self
            .with_deadline("save_refresh_token", self.tokens.save_refresh_token(record))
            .await?;

        info!(
            user_id = %user_id,
            session_id = %saved.id,
            jti = %claims.jti,
            "Issued token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_secret,
            session_id: saved.id,
            access_expires_at,
            refresh_expires_at: saved.expires_at,
        })
    }

    /// Exchanges a refresh secret for a new pair (rotation)
    ///
    /// The presented record is claimed with one conditional update that
    /// only succeeds while it is unrevoked and unexpired; a successor is
    /// issued only if that claim affected the record. Of two concurrent
    /// rotations of the same secret exactly one succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair, with the device label and origin of the old session
    /// * `Err(InvalidCredential)` - Unknown secret, or its owner no longer exists
    /// * `Err(CredentialRevoked)` - Already revoked or rotated (possible replay)
    /// * `Err(CredentialExpired)` - Unrevoked but past its expiry
    pub async fn rotate(&self, refresh_secret: &str) -> Result<TokenPair, DomainError> {
        if refresh_secret.is_empty() {
            return Err(DomainError::invalid_input("refresh token must not be empty"));
        }

        let token_hash = hash_secret(refresh_secret);
        let now = self.now();

        let record = self
            .with_deadline("find_refresh_token", self.tokens.find_refresh_token(&token_hash))
            .await?
            .ok_or_else(|| {
                debug!("Rotation attempted with unknown refresh token");
                TokenError::InvalidCredential
            })?;

        if record.is_revoked() {
            warn!(
                user_id = %record.user_id,
                session_id = %record.id,
                revoked_reason = ?record.revoked_reason,
                "Revoked refresh token presented for rotation, possible replay"
            );
            return Err(TokenError::CredentialRevoked.into());
        }

        if record.is_expired_at(now) {
            debug!(
                user_id = %record.user_id,
                session_id = %record.id,
                "Expired refresh token presented for rotation"
            );
            return Err(TokenError::CredentialExpired.into());
        }

        let identity = self
            .with_deadline("find_identity", self.identities.find_identity(record.user_id))
            .await?
            .ok_or_else(|| {
                warn!(
                    user_id = %record.user_id,
                    session_id = %record.id,
                    "Refresh token owner no longer exists"
                );
                TokenError::InvalidCredential
            })?;

        let claimed = self
            .with_deadline(
                "revoke_if_valid",
                self.tokens
                    .revoke_if_valid(&token_hash, RevocationReason::TokenRotation, now),
            )
            .await?;

        if !claimed {
            warn!(
                user_id = %record.user_id,
                session_id = %record.id,
                "Refresh token claimed by a concurrent rotation"
            );
            return Err(TokenError::CredentialRevoked.into());
        }

        let pair = self
            .issue_pair(
                record.user_id,
                &identity.role,
                record.device_label,
                record.origin_address,
            )
            .await?;

        info!(
            user_id = %record.user_id,
            previous_session_id = %record.id,
            session_id = %pair.session_id,
            "Rotated refresh token"
        );

        Ok(pair)
    }

    /// Encodes claims into an HS256 JWT
    pub(crate) fn encode_access_token(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            DomainError::Token(TokenError::SigningFailed)
        })
    }

    /// Decodes an access token, checking signature, issuer, audience and type
    ///
    /// Time-based claims are not checked here.
    pub(crate) fn decode_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Access token failed verification");
                DomainError::Token(TokenError::InvalidCredential)
            })?
            .claims;

        if !claims.is_access_token() {
            return Err(TokenError::InvalidCredential.into());
        }

        Ok(claims)
    }

    /// Runs a store call under the configured storage deadline
    ///
    /// An elapsed deadline becomes `DomainError::Storage`. Storage failures
    /// are logged here with the name of the store operation.
    pub(crate) async fn with_deadline<R, F>(
        &self,
        operation: &'static str,
        future: F,
    ) -> Result<R, DomainError>
    where
        F: Future<Output = Result<R, DomainError>>,
    {
        let timeout = self.config.storage_timeout;

        match tokio::time::timeout(timeout, future).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if let DomainError::Storage { message } = &e {
                    error!(operation, error = %message, "Token store operation failed");
                }
                Err(e)
            }
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = timeout.as_millis() as u64,
                    "Token store operation timed out"
                );
                Err(DomainError::storage(format!(
                    "{} timed out after {}ms",
                    operation,
                    timeout.as_millis()
                )))
            }
        }
    }
}
