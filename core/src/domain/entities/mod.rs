//! Domain entities representing core business objects.

pub mod blacklist;
pub mod identity;
pub mod token;

// Re-export commonly used types
pub use blacklist::BlacklistEntry;
pub use identity::UserIdentity;
pub use token::{
    Claims, RefreshToken, RevocationReason, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, ACCESS_TOKEN_TYPE, REFRESH_TOKEN_EXPIRY_DAYS,
};
