//! Infrastructure layer for leafscan
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP backend client, persistent token storage,
//! image acquisition, and configuration file loading.

pub mod backend;
pub mod capture;
pub mod config;
pub mod token;

// Re-export commonly used types
pub use backend::{
    auth::HttpAuthGateway, chat::HttpChatGateway, classifier::HttpImageClassifier,
    client::ApiClient, error::ApiError, profile::HttpProfileGateway,
};
pub use capture::{
    camera::CameraCapture,
    fallback::FallbackImageSource,
    file::{FileImageSource, FilePicker},
};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use token::file_store::FileTokenStore;
