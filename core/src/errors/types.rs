//! Credential error types for the token lifecycle

use thiserror::Error;

/// Token-related errors
///
/// `CredentialRevoked` and `CredentialExpired` are distinct terminal states
/// of a refresh token: both mean "log in again", but a revoked token being
/// presented may indicate replay of a stolen secret.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Credential not recognized")]
    InvalidCredential,

    #[error("Credential revoked")]
    CredentialRevoked,

    #[error("Credential expired")]
    CredentialExpired,

    #[error("Token signing failed")]
    SigningFailed,
}
