//! Chat gateway port
//!
//! Conversational turns that go through the backend's `/chat` endpoint, plus
//! retrieval of server-side session history.

use super::classifier::ImagePayload;
use super::gateway::GatewayError;
use async_trait::async_trait;
use leafscan_domain::{Message, Session};

/// Gateway for chat turns and history retrieval
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a text-only turn; the backend replies with an AI message.
    async fn send_text(&self, message: &str) -> Result<Message, GatewayError>;

    /// Send an image turn (multipart) with an optional accompanying text.
    async fn send_image(
        &self,
        image: ImagePayload,
        message: Option<&str>,
    ) -> Result<Message, GatewayError>;

    /// Fetch the authenticated user's past sessions.
    async fn history(&self) -> Result<Vec<Session>, GatewayError>;
}
