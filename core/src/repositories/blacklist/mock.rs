//! Mock implementation of BlacklistRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::blacklist::BlacklistEntry;
use crate::errors::DomainError;

use super::r#trait::BlacklistRepository;

#[derive(Clone)]
pub struct MockBlacklistRepository {
    entries: Arc<RwLock<HashMap<String, BlacklistEntry>>>,
    unavailable: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
}

impl MockBlacklistRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
            latency_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored entry for `jti`, regardless of expiry
    pub async fn get(&self, jti: &str) -> Option<BlacklistEntry> {
        self.entries.read().await.get(jti).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Delay every subsequent call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        let latency_ms = self.latency_ms.load(Ordering::SeqCst);
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("blacklist store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockBlacklistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlacklistRepository for MockBlacklistRepository {
    async fn blacklist_token(&self, entry: BlacklistEntry) -> Result<(), DomainError> {
        self.check_available().await?;
        let mut entries = self.entries.write().await;
        entries.entry(entry.jti.clone()).or_insert(entry);
        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available().await?;
        let entries = self.entries.read().await;
        Ok(entries.get(jti).is_some_and(|entry| entry.is_active_at(now)))
    }
}
