//! Auth gateway port
//!
//! Account creation, credential login, Google OAuth bridging, and profile
//! fetch against the backend's `/auth/*` endpoints.

use super::gateway::GatewayError;
use async_trait::async_trait;
use leafscan_domain::{AuthToken, User};

/// Gateway for authentication operations
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account; returns the bearer token for the new user.
    async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthToken, GatewayError>;

    /// Authenticate with credentials; returns the bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, GatewayError>;

    /// Fetch the profile of the user the current token belongs to.
    async fn current_user(&self) -> Result<User, GatewayError>;

    /// Invalidate the session server-side.
    async fn logout(&self) -> Result<(), GatewayError>;

    /// URL to open in a browser to start the Google OAuth flow.
    async fn google_auth_url(&self) -> Result<String, GatewayError>;

    /// Exchange the OAuth callback code for a bearer token.
    async fn google_callback(&self, code: &str) -> Result<AuthToken, GatewayError>;
}
