//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
///
/// Access tokens are always signed with HS256 using `secret`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing access tokens
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: String::from("authkeep"),
            audience: String::from("authkeep-api"),
        }
    }
}

impl JwtConfig {
    /// Stand-in secret of the production profile, to be overridden at deploy time
    pub const PLACEHOLDER_SECRET: &'static str = "use-env-variable";

    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the audience claim
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Check if using a built-in secret (security warning)
    ///
    /// True for the development default and the production placeholder,
    /// both of which are public.
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET || self.secret == Self::PLACEHOLDER_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Deadline applied to every token/blacklist store access, in milliseconds
    pub storage_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            storage_timeout_ms: default_storage_timeout_ms(),
        }
    }
}

impl AuthConfig {
    /// Set the storage deadline in milliseconds
    pub fn with_storage_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.storage_timeout_ms = timeout_ms;
        self
    }
}

fn default_storage_timeout_ms() -> u64 {
    2000
}
