pub mod blacklist;
pub mod identity;
pub mod token;

pub use blacklist::BlacklistRepository;
pub use identity::IdentityRepository;
pub use token::TokenRepository;

#[cfg(test)]
pub use blacklist::MockBlacklistRepository;
#[cfg(test)]
pub use identity::MockIdentityRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
