//! Image acquisition port
//!
//! Produces an encoded plant image from wherever the user can supply one: a
//! camera device or a file on disk. Camera adapters degrade gracefully to
//! file selection when the device is unavailable.

use async_trait::async_trait;
use leafscan_domain::DataUri;
use thiserror::Error;

/// Upload size cap, matching the backend's limit.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Errors raised while acquiring an image
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No camera capture tool found (install fswebcam or ffmpeg)")]
    NoCamera,

    #[error("Camera capture failed: {0}")]
    CaptureFailed(String),

    #[error("Unsupported image type '{0}', use a JPG or PNG image")]
    UnsupportedType(String),

    #[error("Image is too large ({0} bytes, limit is {MAX_IMAGE_BYTES})")]
    TooLarge(u64),

    #[error("Could not read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of encoded plant images
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Acquire one image, encoded as a data URI.
    async fn acquire(&self) -> Result<DataUri, CaptureError>;
}

/// File picker: acquire an image from a caller-chosen path.
///
/// Used where the path is only known at interaction time (the chat REPL's
/// `/image` command), unlike [`ImageSource`] adapters which are configured
/// up front.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self, path: &std::path::Path) -> Result<DataUri, CaptureError>;
}
