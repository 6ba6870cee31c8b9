//! Shared fixtures for token service tests

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::repositories::{MockBlacklistRepository, MockIdentityRepository, MockTokenRepository};
use crate::services::token::{Clock, ManualClock, TokenService, TokenServiceConfig};

pub const SIGNING_SECRET: &str = "unit-test-signing-secret";
pub const STORAGE_TIMEOUT: StdDuration = StdDuration::from_millis(200);

pub type TestService =
    TokenService<MockTokenRepository, MockBlacklistRepository, MockIdentityRepository>;

pub struct Harness {
    pub service: TestService,
    pub tokens: MockTokenRepository,
    pub blacklist: MockBlacklistRepository,
    pub identities: MockIdentityRepository,
    pub clock: ManualClock,
}

impl Harness {
    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::new(SIGNING_SECRET).with_storage_timeout(STORAGE_TIMEOUT)
}

pub fn harness() -> Harness {
    let tokens = MockTokenRepository::new();
    let blacklist = MockBlacklistRepository::new();
    let identities = MockIdentityRepository::new();
    let clock = ManualClock::new(start_time());

    let service = TokenService::new(
        tokens.clone(),
        blacklist.clone(),
        identities.clone(),
        test_config(),
    )
    .unwrap()
    .with_clock(Arc::new(clock.clone()));

    Harness {
        service,
        tokens,
        blacklist,
        identities,
        clock,
    }
}

/// Harness with one registered user holding `role`
pub async fn harness_with_user(role: &str) -> (Harness, Uuid) {
    let harness = harness();
    let user_id = Uuid::new_v4();
    harness.identities.set_role(user_id, role).await;
    (harness, user_id)
}

/// Signs arbitrary claims with `secret`
pub fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Access token claims as the service would issue them at `issued_at`
pub fn access_claims(user_id: Uuid, issued_at: DateTime<Utc>) -> Claims {
    let config = test_config();
    Claims::new_access_token(user_id, "Client", issued_at, config.issuer, config.audience)
}
