//! Chat turns and history over `/chat` and `/history`.

use super::classifier::image_form;
use super::client::ApiClient;
use super::protocol::{WireMessage, WireSession};
use async_trait::async_trait;
use leafscan_application::{ChatGateway, GatewayError, ImagePayload};
use leafscan_domain::{Message, Session};
use serde_json::json;
use std::sync::Arc;

pub struct HttpChatGateway {
    client: Arc<ApiClient>,
}

impl HttpChatGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn decode_message(value: serde_json::Value) -> Result<Message, GatewayError> {
        let wire: WireMessage =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        wire.into_message()
            .ok_or_else(|| GatewayError::Decode("chat reply carried no content".to_string()))
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send_text(&self, message: &str) -> Result<Message, GatewayError> {
        let value = self
            .client
            .post_json("/chat", &json!({ "message": message }))
            .await?;
        Self::decode_message(value)
    }

    async fn send_image(
        &self,
        image: ImagePayload,
        message: Option<&str>,
    ) -> Result<Message, GatewayError> {
        let form = image_form(image, message)?;
        let value = self.client.post_multipart("/chat", form).await?;
        Self::decode_message(value)
    }

    async fn history(&self) -> Result<Vec<Session>, GatewayError> {
        let value = self.client.get_json("/history").await?;
        let wire: Vec<WireSession> =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(wire.into_iter().map(WireSession::into_session).collect())
    }
}
