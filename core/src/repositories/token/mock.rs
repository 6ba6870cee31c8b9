//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, RevocationReason};
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory token repository keyed by digest
///
/// Each conditional update runs under the write lock, which gives it the
/// same single-row atomicity as the SQL implementation.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    unavailable: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
    claim_unavailable: Arc<AtomicBool>,
    claim_latency_ms: Arc<AtomicU64>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
            latency_ms: Arc::new(AtomicU64::new(0)),
            claim_unavailable: Arc::new(AtomicBool::new(false)),
            claim_latency_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records, in any state
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Overwrite the expiry of the record with this id
    pub async fn set_expires_at(&self, id: Uuid, expires_at: DateTime<Utc>) {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.values_mut().find(|t| t.id == id) {
            token.expires_at = expires_at;
        }
    }

    /// Delay every subsequent call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make only `revoke_if_valid` fail with a storage error
    pub fn set_claim_unavailable(&self, unavailable: bool) {
        self.claim_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay only `revoke_if_valid` by `latency`
    pub fn set_claim_latency(&self, latency: Duration) {
        self.claim_latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        let latency_ms = self.latency_ms.load(Ordering::SeqCst);
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::storage("Token already exists"));
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.id == id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError> {
        self.check_available().await?;
        let tokens = self.tokens.read().await;
        let mut active: Vec<RefreshToken> = tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_valid_at(now))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(active)
    }

    async fn revoke_token(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;
        Ok(match tokens.get_mut(token_hash) {
            Some(token) => token.revoke(reason, now),
            None => false,
        })
    }

    async fn revoke_if_valid(
        &self,
        token_hash: &str,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available().await?;

        let claim_latency_ms = self.claim_latency_ms.load(Ordering::SeqCst);
        if claim_latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(claim_latency_ms)).await;
        }
        if self.claim_unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("token store unavailable"));
        }

        let mut tokens = self.tokens.write().await;
        Ok(match tokens.get_mut(token_hash) {
            Some(token) if token.is_valid_at(now) => token.revoke(reason, now),
            _ => false,
        })
    }

    async fn revoke_session(
        &self,
        id: Uuid,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;
        Ok(match tokens.values_mut().find(|t| t.id == id) {
            Some(token) if token.user_id == user_id && token.is_valid_at(now) => {
                token.revoke(reason, now)
            }
            _ => false,
        })
    }

    async fn revoke_all_user_tokens(
        &self,
        user_id: Uuid,
        reason: RevocationReason,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        self.check_available().await?;
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.values_mut().filter(|t| t.user_id == user_id) {
            if token.revoke(reason, now) {
                count += 1;
            }
        }

        Ok(count)
    }
}
