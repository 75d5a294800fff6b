//! Profile read/write over `/profile`.

use super::classifier::image_form;
use super::client::ApiClient;
use super::protocol::WireUser;
use async_trait::async_trait;
use leafscan_application::{GatewayError, ImagePayload, ProfileGateway};
use leafscan_domain::User;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct HttpProfileGateway {
    client: Arc<ApiClient>,
}

impl HttpProfileGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn decode_user(value: Value) -> Result<User, GatewayError> {
        let wire: WireUser =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(wire.into())
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn fetch(&self) -> Result<User, GatewayError> {
        let value = self.client.get_json("/profile").await?;
        Self::decode_user(value)
    }

    async fn update(&self, user: &User) -> Result<User, GatewayError> {
        let value = self
            .client
            .post_json(
                "/profile/update",
                &json!({ "name": user.name, "email": user.email }),
            )
            .await?;
        // Some deployments echo the profile back, others return an empty body
        if value.is_null() {
            return Ok(user.clone());
        }
        Self::decode_user(value)
    }

    async fn update_image(&self, image: ImagePayload) -> Result<(), GatewayError> {
        let form = image_form(image, None)?;
        self.client.post_multipart("/profile/image", form).await?;
        Ok(())
    }
}
