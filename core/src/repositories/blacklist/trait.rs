//! Blacklist repository trait for revoked access token identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::blacklist::BlacklistEntry;
use crate::errors::DomainError;

/// Repository trait for the access token blacklist
///
/// Entries are keyed by `jti`. Once an entry's `expires_at` has passed it no
/// longer has any effect; lookups filter on it.
#[async_trait]
pub trait BlacklistRepository: Send + Sync {
    /// Add a token identifier to the blacklist
    ///
    /// Idempotent: blacklisting a `jti` that is already present succeeds and
    /// never extends the stored expiry.
    async fn blacklist_token(&self, entry: BlacklistEntry) -> Result<(), DomainError>;

    /// Whether `jti` has an entry that is still in force at `now`
    async fn is_token_blacklisted(&self, jti: &str, now: DateTime<Utc>) -> Result<bool, DomainError>;
}
