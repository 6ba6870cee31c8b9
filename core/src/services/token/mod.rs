//! Token service module for the credential lifecycle
//!
//! This module handles all token-related operations including:
//! - Access/refresh pair issuance
//! - Refresh token rotation with a single conditional claim
//! - Logout, logout-all-devices and single session revocation
//! - Active session listing
//! - Access token blacklist checks and verification

mod blacklist;
mod clock;
mod config;
mod hasher;
mod revocation;
mod service;
mod sessions;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use hasher::{generate_refresh_secret, hash_secret, REFRESH_SECRET_LENGTH};
pub use service::TokenService;
