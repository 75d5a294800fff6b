//! Shared error taxonomy for the backend-facing ports.
//!
//! Mirrors how failures are shown to the user: connectivity problems get a
//! generic message, server-reported validation/auth errors are surfaced
//! verbatim from the response body.

use thiserror::Error;

/// Errors returned by backend gateway adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport-level failure; the server was never reached or the
    /// connection broke mid-request.
    #[error("Could not reach the server, check your connection ({0})")]
    Network(String),

    /// The server reported an error. The message comes verbatim from the
    /// response body and is suitable for display.
    #[error("{0}")]
    Server(String),

    /// The request requires a valid bearer token and none was accepted.
    #[error("Not authenticated, please log in")]
    Unauthorized,

    /// A 2xx response whose body did not match the expected shape.
    #[error("Malformed server response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}
