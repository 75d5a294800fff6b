//! Authentication over the `/auth/*` endpoints.

use super::client::ApiClient;
use super::protocol::{GoogleUrlResponse, TokenResponse, WireUser};
use async_trait::async_trait;
use leafscan_application::{AuthGateway, GatewayError};
use leafscan_domain::{AuthToken, User};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct HttpAuthGateway {
    client: Arc<ApiClient>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn decode_token(value: Value) -> Result<AuthToken, GatewayError> {
        let response: TokenResponse =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(AuthToken::new(response.token))
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthToken, GatewayError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        let value = self.client.post_json("/auth/signup", &body).await?;
        Self::decode_token(value)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, GatewayError> {
        let value = self
            .client
            .post_json("/auth/login", &json!({ "email": email, "password": password }))
            .await?;
        Self::decode_token(value)
    }

    async fn current_user(&self) -> Result<User, GatewayError> {
        let value = self.client.get_json("/auth/user").await?;
        let wire: WireUser =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(wire.into())
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.client.post_json("/auth/logout", &json!({})).await?;
        Ok(())
    }

    async fn google_auth_url(&self) -> Result<String, GatewayError> {
        let value = self.client.get_json("/auth/google/url").await?;
        let response: GoogleUrlResponse =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(response.url)
    }

    async fn google_callback(&self, code: &str) -> Result<AuthToken, GatewayError> {
        let value = self
            .client
            .get_json_with_query("/auth/google/callback", &[("code", code)])
            .await?;
        Self::decode_token(value)
    }
}
