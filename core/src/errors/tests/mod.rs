//! Unit tests for domain error types

use crate::errors::{DomainError, TokenError};

#[test]
fn test_token_error_messages() {
    assert_eq!(TokenError::InvalidCredential.to_string(), "Credential not recognized");
    assert_eq!(TokenError::CredentialRevoked.to_string(), "Credential revoked");
    assert_eq!(TokenError::CredentialExpired.to_string(), "Credential expired");
}

#[test]
fn test_token_error_bridges_transparently() {
    let error: DomainError = TokenError::CredentialRevoked.into();
    assert_eq!(error.to_string(), "Credential revoked");
    assert!(matches!(error, DomainError::Token(TokenError::CredentialRevoked)));
}

#[test]
fn test_reauthentication_classification() {
    assert!(DomainError::from(TokenError::InvalidCredential).requires_reauthentication());
    assert!(DomainError::from(TokenError::CredentialRevoked).requires_reauthentication());
    assert!(DomainError::from(TokenError::CredentialExpired).requires_reauthentication());
    assert!(!DomainError::from(TokenError::SigningFailed).requires_reauthentication());
    assert!(!DomainError::storage("timeout").requires_reauthentication());
}

#[test]
fn test_only_storage_failures_are_retryable() {
    assert!(DomainError::storage("connection reset").is_retryable());
    assert!(!DomainError::invalid_input("empty secret").is_retryable());
    assert!(!DomainError::NotFound { resource: "session".to_string() }.is_retryable());
    assert!(!DomainError::from(TokenError::CredentialRevoked).is_retryable());
}
