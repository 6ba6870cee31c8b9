//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
///
/// Every failing operation of the token lifecycle reports one of these.
/// Credential failures live in [`TokenError`] and are bridged through
/// `DomainError::Token`.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or malformed arguments; not retryable without correction
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The requested resource does not exist or is not owned by the caller
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Transient store failure, including an elapsed storage deadline
    #[error("Storage failure: {message}")]
    Storage { message: String },

    /// Misconfiguration such as an empty signing secret
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for a `Storage` error
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    /// Whether a collaborator may retry the call unchanged (with backoff)
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Storage { .. })
    }

    /// Whether the caller has to log in again to obtain new credentials
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::InvalidCredential
                    | TokenError::CredentialRevoked
                    | TokenError::CredentialExpired
            )
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
