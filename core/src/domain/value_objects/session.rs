//! Session listing value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;

/// Public view of one live refresh token record, without its digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session id (refresh token record id)
    pub id: Uuid,

    /// Device label supplied at login
    pub device_label: Option<String>,

    /// Address the session originated from
    pub origin_address: Option<String>,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

impl From<RefreshToken> for SessionInfo {
    fn from(token: RefreshToken) -> Self {
        Self {
            id: token.id,
            device_label: token.device_label,
            origin_address: token.origin_address,
            created_at: token.created_at,
            expires_at: token.expires_at,
        }
    }
}

/// Active sessions of a user, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSessions {
    pub sessions: Vec<SessionInfo>,
    pub count: usize,
}

impl ActiveSessions {
    pub fn new(sessions: Vec<SessionInfo>) -> Self {
        let count = sessions.len();
        Self { sessions, count }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
