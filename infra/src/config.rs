//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. `AppConfig::for_environment` defaults
//! 2. Optional `config.<environment>.toml` in the working directory
//! 3. `AUTHKEEP__*` environment variables, e.g. `AUTHKEEP__AUTH__JWT__SECRET`
//!
//! Production refuses to start on a built-in signing secret.

use ak_shared::config::{AppConfig, Environment};
use config::{Config, File};

use crate::InfrastructureError;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "AUTHKEEP";

/// Load the application configuration for the current environment
///
/// Reads `.env` first if present, then detects the environment from
/// `ENVIRONMENT`/`ENV`/`RUST_ENV`.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let overrides = config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true);

    load_config_with(environment, overrides)
}

/// Load the configuration for `environment` with an explicit override source
pub fn load_config_with(
    environment: Environment,
    overrides: config::Environment,
) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::for_environment(environment);

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(overrides)
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if config.auth.jwt.secret.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "auth.jwt.secret must not be empty".to_string(),
        ));
    }

    if (environment.is_production() || config.environment.is_production())
        && config.auth.jwt.is_using_default_secret()
    {
        return Err(InfrastructureError::Config(format!(
            "auth.jwt.secret is a built-in value; set {}__AUTH__JWT__SECRET for production",
            ENV_PREFIX
        )));
    }

    tracing::debug!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}
