//! # Authkeep Core
//!
//! Token lifecycle and session management for the Authkeep backend.
//! This crate contains the domain entities, the error taxonomy, the
//! repository interfaces for the refresh-token and blacklist stores, and
//! the `TokenService` that issues, rotates and revokes credentials.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ActiveSessions, BlacklistEntry, Claims, RefreshToken, RevocationReason, SessionInfo,
    TokenPair, UserIdentity,
};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{BlacklistRepository, IdentityRepository, TokenRepository};
pub use services::{Clock, ManualClock, SystemClock, TokenService, TokenServiceConfig};
