//! # Infrastructure Layer
//!
//! Concrete implementations behind the `ak_core` repository traits and the
//! process-level plumbing around them:
//!
//! - **Database**: MySQL token, blacklist and identity repositories (SQLx),
//!   connection pooling and schema migrations
//! - **Config**: layered configuration loading (`.env`, files, environment)
//! - **Telemetry**: tracing subscriber initialisation
//!
//! [`initialize`] wires all of it into a ready-to-use [`MySqlTokenService`].

pub mod config;
pub mod database;
pub mod telemetry;

use std::sync::Arc;

use ak_core::errors::DomainError;
use ak_core::services::{TokenService, TokenServiceConfig};
use ak_shared::config::AppConfig;

use database::{DatabasePool, MySqlBlacklistRepository, MySqlIdentityRepository, MySqlTokenRepository};

pub use self::config::load_config;
pub use telemetry::init_tracing;

/// Token service backed by MySQL stores
pub type MySqlTokenService =
    TokenService<MySqlTokenRepository, MySqlBlacklistRepository, MySqlIdentityRepository>;

/// Connected infrastructure ready to serve token operations
#[derive(Clone)]
pub struct InfrastructureServices {
    pub pool: DatabasePool,
    pub token_service: Arc<MySqlTokenService>,
}

impl InfrastructureServices {
    /// Whether the token stores are reachable
    pub async fn is_healthy(&self) -> bool {
        self.pool.health_check().await.unwrap_or(false)
    }

    /// Close the connection pool
    ///
    /// Token operations started after this fail with a storage error.
    pub async fn shutdown(&self) {
        tracing::info!(pool = %self.pool.get_statistics(), "Shutting down infrastructure services");
        self.pool.close().await;
    }
}

/// Connect to the database, run migrations and build the token service
///
/// Tracing is expected to be initialised by the caller beforehand.
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    let pool = DatabasePool::new(&config.database).await?;
    if !pool.health_check().await? {
        return Err(InfrastructureError::Config(
            "Database health check returned an unexpected result".to_string(),
        ));
    }
    pool.run_migrations().await?;

    let token_service = build_token_service(&pool, config)?;

    tracing::info!(pool = %pool.get_statistics(), "Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        pool,
        token_service: Arc::new(token_service),
    })
}

/// Build a token service over an existing pool
pub fn build_token_service(
    pool: &DatabasePool,
    config: &AppConfig,
) -> Result<MySqlTokenService, InfrastructureError> {
    let service_config = TokenServiceConfig::from_auth_config(&config.auth)?;

    let service = TokenService::new(
        MySqlTokenRepository::new(pool.get_pool().clone()),
        MySqlBlacklistRepository::new(pool.get_pool().clone()),
        MySqlIdentityRepository::new(pool.get_pool().clone()),
        service_config,
    )?;

    Ok(service)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration source or deserialization error
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain-level error raised while wiring services
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Domain(inner) => inner,
            InfrastructureError::Settings(e) => DomainError::Configuration {
                message: e.to_string(),
            },
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::storage(other.to_string()),
        }
    }
}
