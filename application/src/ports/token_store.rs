//! Token store port
//!
//! The bearer token is the one piece of state that survives process
//! restarts. Storage failures degrade rather than fail: adapters log and
//! carry on, leaving the user logged out at worst.

use leafscan_domain::AuthToken;

/// Persistent storage for the bearer token
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<AuthToken>;

    /// Persist the token, replacing any previous one.
    fn save(&self, token: &AuthToken);

    /// Remove the persisted token.
    fn clear(&self);
}
