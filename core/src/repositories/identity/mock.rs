//! Mock implementation of IdentityRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::identity::UserIdentity;
use crate::errors::DomainError;

use super::r#trait::IdentityRepository;

#[derive(Clone)]
pub struct MockIdentityRepository {
    users: Arc<RwLock<HashMap<Uuid, UserIdentity>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockIdentityRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register a user, or change the role of an existing one
    pub async fn set_role(&self, user_id: Uuid, role: impl Into<String>) {
        let mut users = self.users.write().await;
        users.insert(user_id, UserIdentity::new(user_id, role));
    }

    pub async fn remove(&self, user_id: Uuid) {
        self.users.write().await.remove(&user_id);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl Default for MockIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
    async fn find_identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("identity store unavailable"));
        }
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }
}
