//! Profile gateway port

use super::classifier::ImagePayload;
use super::gateway::GatewayError;
use async_trait::async_trait;
use leafscan_domain::User;

/// Gateway for profile read/write
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn fetch(&self) -> Result<User, GatewayError>;

    /// Update name/email; returns the profile as the server now sees it.
    async fn update(&self, user: &User) -> Result<User, GatewayError>;

    /// Upload a new profile picture (multipart).
    async fn update_image(&self, image: ImagePayload) -> Result<(), GatewayError>;
}
