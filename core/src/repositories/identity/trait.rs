//! Identity lookup used to stamp the current role into access tokens.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::identity::UserIdentity;
use crate::errors::DomainError;

/// Read-only view of the user store
///
/// The token lifecycle never creates or modifies users; it only needs the
/// role a user holds at the time a pair is issued or rotated.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find the identity of a user
    ///
    /// # Returns
    /// * `Ok(Some(UserIdentity))` - User exists
    /// * `Ok(None)` - User does not exist (e.g. deleted)
    async fn find_identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError>;
}
