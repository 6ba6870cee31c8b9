//! Refresh secret generation and digesting

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a raw refresh secret (alphanumeric, ~285 bits of entropy)
pub const REFRESH_SECRET_LENGTH: usize = 48;

/// Generates a new raw refresh secret from the operating system RNG
pub fn generate_refresh_secret() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(REFRESH_SECRET_LENGTH)
        .map(char::from)
        .collect()
}

/// Hashes a refresh secret for storage
///
/// Lowercase hex SHA-256. Deterministic, so the digest doubles as the
/// lookup key of the refresh token record.
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}
