//! Normalized HTTP adapter errors

use leafscan_application::GatewayError;
use thiserror::Error;

/// Errors produced by the HTTP adapter, before mapping into the port-level
/// [`GatewayError`] taxonomy.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// A 200 response whose body carried an `error` field. The backend uses
    /// this convention for some validation failures.
    #[error("Server error: {0}")]
    Server(String),

    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl From<ApiError> for GatewayError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Network(message) => GatewayError::Network(message),
            ApiError::Status { status: 401, .. } => GatewayError::Unauthorized,
            ApiError::Status { status, message } => GatewayError::Server(
                message.unwrap_or_else(|| format!("Server error (HTTP {status})")),
            ),
            ApiError::Server(message) => GatewayError::Server(message),
            ApiError::Decode(message) => GatewayError::Decode(message),
        }
    }
}
