//! MySQL repository implementations

mod blacklist_repository_impl;
mod identity_repository_impl;
mod token_repository_impl;

pub use blacklist_repository_impl::MySqlBlacklistRepository;
pub use identity_repository_impl::MySqlIdentityRepository;
pub use token_repository_impl::MySqlTokenRepository;

use ak_core::errors::DomainError;

/// Maps a driver error into a storage failure with context
pub(crate) fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::storage(format!("{}: {}", context, error))
}
