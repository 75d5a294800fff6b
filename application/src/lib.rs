//! Application layer for leafscan
//!
//! This crate contains the services that orchestrate a diagnosis
//! conversation and the port definitions their adapters implement.
//! It depends only on the domain layer.

pub mod ports;
pub mod services;

// Re-export commonly used types
pub use ports::{
    auth_gateway::AuthGateway,
    chat_gateway::ChatGateway,
    classifier::{ImageClassifier, ImagePayload},
    gateway::GatewayError,
    image_source::{CaptureError, ImagePicker, ImageSource, MAX_IMAGE_BYTES},
    profile_gateway::ProfileGateway,
    token_store::TokenStore,
};
pub use services::auth_session::AuthService;
pub use services::chat_manager::{ChatManager, SendError};
