//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{
    generate_refresh_secret, hash_secret, Clock, ManualClock, SystemClock, TokenService,
    TokenServiceConfig,
};
