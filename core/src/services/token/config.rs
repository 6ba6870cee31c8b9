//! Configuration for the token service

use std::time::Duration;

use ak_shared::config::auth::{AuthConfig, JwtConfig};

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// `iss` claim written and required
    pub issuer: String,
    /// `aud` claim written and required
    pub audience: String,
    /// Deadline for each token/blacklist/identity store call
    pub storage_timeout: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            issuer: jwt.issuer,
            audience: jwt.audience,
            storage_timeout: Duration::from_millis(AuthConfig::default().storage_timeout_ms),
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with the given signing secret and defaults otherwise
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Build from the application's auth configuration
    ///
    /// # Errors
    ///
    /// `DomainError::Configuration` if the signing secret is empty or a
    /// zero storage timeout is configured.
    pub fn from_auth_config(config: &AuthConfig) -> Result<Self, DomainError> {
        if config.jwt.is_using_default_secret() {
            tracing::warn!("Token service is using a built-in signing secret");
        }

        let service_config = Self {
            jwt_secret: config.jwt.secret.clone(),
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            storage_timeout: Duration::from_millis(config.storage_timeout_ms),
        };
        service_config.validate()?;
        Ok(service_config)
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Check the configuration is usable for signing
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }
        if self.storage_timeout.is_zero() {
            return Err(DomainError::Configuration {
                message: "storage timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
