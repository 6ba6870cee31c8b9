//! Token entities for JWT access tokens and stored refresh tokens.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token lifetime (30 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Value of the `type` claim carried by access tokens
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Storage width of the device label column
pub const MAX_DEVICE_LABEL_LENGTH: usize = 255;

/// Storage width of the origin address column
pub const MAX_ORIGIN_ADDRESS_LENGTH: usize = 64;

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Authorization role of the user at issuance time
    pub role: String,

    /// JWT ID, unique per issuance
    pub jti: String,

    /// Token type, always `"access"`
    #[serde(rename = "type")]
    pub token_type: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims for an access token issued at `issued_at`
    ///
    /// Every call assigns a fresh random `jti` so the token can later be
    /// referenced from the blacklist.
    pub fn new_access_token(
        user_id: Uuid,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let expiry = issued_at + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES);

        Self {
            sub: user_id.to_string(),
            role: role.into(),
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer.into(),
            aud: audience.into(),
        }
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Checks if `now` lies within `[nbf, exp)`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Whether this is an access token
    pub fn is_access_token(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiry as a timestamp, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Why a refresh token was revoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    UserLogout,
    TokenRotation,
    PasswordChanged,
    UserDeleted,
    LogoutAllDevices,
    ManualRevoke,
}

impl RevocationReason {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationReason::UserLogout => "user_logout",
            RevocationReason::TokenRotation => "token_rotation",
            RevocationReason::PasswordChanged => "password_changed",
            RevocationReason::UserDeleted => "user_deleted",
            RevocationReason::LogoutAllDevices => "logout_all_devices",
            RevocationReason::ManualRevoke => "manual_revoke",
        }
    }

    /// Reasons that may be used to revoke every session of a user at once
    pub fn is_bulk_reason(&self) -> bool {
        matches!(
            self,
            RevocationReason::PasswordChanged
                | RevocationReason::UserDeleted
                | RevocationReason::LogoutAllDevices
        )
    }
}

impl std::fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RevocationReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_logout" => Ok(RevocationReason::UserLogout),
            "token_rotation" => Ok(RevocationReason::TokenRotation),
            "password_changed" => Ok(RevocationReason::PasswordChanged),
            "user_deleted" => Ok(RevocationReason::UserDeleted),
            "logout_all_devices" => Ok(RevocationReason::LogoutAllDevices),
            "manual_revoke" => Ok(RevocationReason::ManualRevoke),
            other => Err(format!("Unknown revocation reason: {}", other)),
        }
    }
}

/// Refresh token record stored in the database
///
/// Only the digest of the raw secret is stored. A record is valid while
/// `revoked_at` is absent and the current time is before `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier, doubles as the session id
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Digest of the raw refresh secret
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was revoked
    pub revoked_at: Option<DateTime<Utc>>,

    /// Reason recorded at revocation
    pub revoked_reason: Option<RevocationReason>,

    /// Free-form device label supplied at login
    pub device_label: Option<String>,

    /// Network address the session originated from
    pub origin_address: Option<String>,
}

impl RefreshToken {
    /// Creates a new refresh token record issued at `now`
    pub fn issue(
        user_id: Uuid,
        token_hash: String,
        device_label: Option<String>,
        origin_address: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            revoked_at: None,
            revoked_reason: None,
            device_label: device_label.map(|label| truncate_chars(label, MAX_DEVICE_LABEL_LENGTH)),
            origin_address: origin_address
                .map(|addr| truncate_chars(addr, MAX_ORIGIN_ADDRESS_LENGTH)),
        }
    }

    /// Whether the token has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks if the refresh token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired_at(now)
    }

    /// Revokes the refresh token
    ///
    /// Revocation is write-once: returns `false` and leaves the record
    /// untouched if it was already revoked.
    pub fn revoke(&mut self, reason: RevocationReason, at: DateTime<Utc>) -> bool {
        if self.is_revoked() {
            return false;
        }
        self.revoked_at = Some(at);
        self.revoked_reason = Some(reason);
        true
    }
}

/// Token pair returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Raw refresh secret, never stored
    pub refresh_token: String,

    /// Id of the refresh token record (session) created with this pair
    pub session_id: Uuid,

    /// Access token expiry
    pub access_expires_at: DateTime<Utc>,

    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Seconds until the access token expires
    pub fn access_expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.access_expires_at - now).num_seconds().max(0)
    }

    /// Seconds until the refresh token expires
    pub fn refresh_expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.refresh_expires_at - now).num_seconds().max(0)
    }
}

fn truncate_chars(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value,
    }
}
