//! User identity as seen by the token lifecycle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity owned by the account collaborator
///
/// Only the id and the role label used as an authorization claim are
/// consumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub role: String,
}

impl UserIdentity {
    pub fn new(id: Uuid, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }
}
