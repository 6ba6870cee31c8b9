//! Blacklist entry for access tokens revoked before their natural expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::{Claims, RevocationReason};

/// Revoked access token identifier
///
/// `expires_at` is copied from the token's own `exp` claim and is never
/// extended, so an entry stops mattering exactly when the token would have
/// stopped verifying anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    /// JWT ID of the revoked access token
    pub jti: String,

    /// Owner of the revoked token
    pub user_id: Uuid,

    /// Expiry of the revoked token
    pub expires_at: DateTime<Utc>,

    /// Why the token was revoked
    pub reason: RevocationReason,

    /// When the entry was written
    pub created_at: DateTime<Utc>,
}

impl BlacklistEntry {
    /// Builds an entry from verified access token claims
    ///
    /// Returns `None` when the subject is not a UUID or `exp` is out of range.
    pub fn from_claims(
        claims: &Claims,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        Some(Self {
            jti: claims.jti.clone(),
            user_id: claims.user_id().ok()?,
            expires_at: claims.expires_at()?,
            reason,
            created_at: now,
        })
    }

    /// Whether the entry still blocks its token at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
