//! Active session listing

use uuid::Uuid;

use crate::domain::value_objects::session::{ActiveSessions, SessionInfo};
use crate::errors::DomainError;
use crate::repositories::{BlacklistRepository, IdentityRepository, TokenRepository};

use super::service::TokenService;

impl<T, B, I> TokenService<T, B, I>
where
    T: TokenRepository,
    B: BlacklistRepository,
    I: IdentityRepository,
{
    /// Lists the valid sessions of a user, newest first
    pub async fn list_active_sessions(&self, user_id: Uuid) -> Result<ActiveSessions, DomainError> {
        let now = self.now();
        let tokens = self
            .with_deadline(
                "find_active_by_user",
                self.tokens.find_active_by_user(user_id, now),
            )
            .await?;

        let sessions = tokens.into_iter().map(SessionInfo::from).collect();
        Ok(ActiveSessions::new(sessions))
    }

    /// Number of valid sessions of a user
    pub async fn count_active_sessions(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let now = self.now();
        self.with_deadline(
            "count_active_by_user",
            self.tokens.count_active_by_user(user_id, now),
        )
        .await
    }
}
