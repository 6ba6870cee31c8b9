//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and storage deadline configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create the baseline configuration for an environment
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                environment,
                database: DatabaseConfig::new("mysql://localhost:3306/authkeep_dev"),
                auth: AuthConfig::default(),
                logging: LoggingConfig::for_environment(environment),
            },
            Environment::Staging => Self {
                environment,
                database: DatabaseConfig::default(),
                auth: AuthConfig::default(),
                logging: LoggingConfig::for_environment(environment),
            },
            Environment::Production => Self {
                environment,
                database: DatabaseConfig::new("mysql://prod-db:3306/authkeep")
                    .with_max_connections(50),
                auth: AuthConfig {
                    jwt: JwtConfig::new(JwtConfig::PLACEHOLDER_SECRET),
                    ..Default::default()
                },
                logging: LoggingConfig::for_environment(environment),
            },
        }
    }
}
