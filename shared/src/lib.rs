//! Shared configuration types for the Authkeep server crates
//!
//! This crate provides the configuration structures used across the
//! workspace:
//! - Authentication and signing configuration
//! - Database connection configuration
//! - Environment detection and logging configuration

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
};
