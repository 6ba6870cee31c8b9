//! Blacklist checks on the request authentication path

use tracing::{debug, warn};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{BlacklistRepository, IdentityRepository, TokenRepository};

use super::service::TokenService;

impl<T, B, I> TokenService<T, B, I>
where
    T: TokenRepository,
    B: BlacklistRepository,
    I: IdentityRepository,
{
    /// Whether an access token id has been blacklisted and is still in force
    ///
    /// Fails open: if the blacklist store errors or misses its deadline the
    /// token is reported as not blacklisted and a warning is logged.
    pub async fn is_blacklisted(&self, jti: &str) -> bool {
        if jti.is_empty() {
            return false;
        }

        let now = self.now();
        match self
            .with_deadline(
                "is_token_blacklisted",
                self.blacklist.is_token_blacklisted(jti, now),
            )
            .await
        {
            Ok(blacklisted) => blacklisted,
            Err(e) => {
                warn!(jti, error = %e, "Blacklist check failed, allowing token");
                false
            }
        }
    }

    /// Verifies an access token and returns its claims
    ///
    /// Checks the signature, issuer, audience and token type, then `nbf`
    /// and `exp` against the service clock, then the blacklist.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(InvalidCredential)` - Bad signature, malformed or not yet valid
    /// * `Err(CredentialExpired)` - Past `exp`
    /// * `Err(CredentialRevoked)` - Blacklisted
    pub async fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_access_token(token)?;
        let now = self.now();

        if claims.is_expired_at(now) {
            debug!(jti = %claims.jti, "Access token expired");
            return Err(TokenError::CredentialExpired.into());
        }

        if !claims.is_valid_at(now) {
            debug!(jti = %claims.jti, "Access token not yet valid");
            return Err(TokenError::InvalidCredential.into());
        }

        if self.is_blacklisted(&claims.jti).await {
            debug!(jti = %claims.jti, "Access token is blacklisted");
            return Err(TokenError::CredentialRevoked.into());
        }

        Ok(claims)
    }
}
