//! Auth session service.
//!
//! Holds the current authentication state (the logged-in user's profile) and
//! the persisted bearer token. Auth failures propagate to the caller so
//! forms can display them, and always reset the local state to logged-out
//! first.

use crate::ports::auth_gateway::AuthGateway;
use crate::ports::gateway::GatewayError;
use crate::ports::token_store::TokenStore;
use leafscan_domain::{AuthToken, User};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Service owning authentication state.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
    user: Mutex<Option<User>>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            user: Mutex::new(None),
        }
    }

    /// Authenticate with credentials and populate the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, GatewayError> {
        let token = self.gateway.login(email, password).await;
        self.complete_login(token).await
    }

    /// Create an account and log in as the new user.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, GatewayError> {
        let token = self.gateway.signup(email, password, name).await;
        self.complete_login(token).await
    }

    /// URL to open in a browser to start the Google OAuth flow.
    pub async fn google_login_url(&self) -> Result<String, GatewayError> {
        self.gateway.google_auth_url().await
    }

    /// Finish the Google OAuth flow with the callback code.
    pub async fn google_login(&self, code: &str) -> Result<User, GatewayError> {
        let token = self.gateway.google_callback(code).await;
        self.complete_login(token).await
    }

    async fn complete_login(
        &self,
        token: Result<AuthToken, GatewayError>,
    ) -> Result<User, GatewayError> {
        let token = match token {
            Ok(token) => token,
            Err(e) => {
                self.reset_local().await;
                return Err(e);
            }
        };
        self.tokens.save(&token);

        match self.gateway.current_user().await {
            Ok(user) => {
                info!(email = %user.email, "logged in");
                *self.user.lock().await = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.reset_local().await;
                Err(e)
            }
        }
    }

    /// Restore authentication state from a persisted token, if one exists
    /// and is still accepted by the backend. An invalid token is cleared
    /// silently.
    pub async fn hydrate(&self) {
        if self.tokens.load().is_none() {
            return;
        }
        match self.gateway.current_user().await {
            Ok(user) => {
                info!(email = %user.email, "session restored");
                *self.user.lock().await = Some(user);
            }
            Err(e) => {
                warn!("persisted token rejected: {e}");
                self.tokens.clear();
            }
        }
    }

    /// Log out. The server-side invalidation is best-effort; local state and
    /// the persisted token are always cleared.
    pub async fn logout(&self) {
        if let Err(e) = self.gateway.logout().await {
            warn!("server-side logout failed: {e}");
        }
        self.reset_local().await;
    }

    /// Replace the cached profile (after a profile update).
    pub async fn update_user(&self, user: User) {
        *self.user.lock().await = Some(user);
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.lock().await.is_some()
    }

    async fn reset_local(&self) {
        self.tokens.clear();
        *self.user.lock().await = None;
    }
}
