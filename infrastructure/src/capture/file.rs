//! File-picker equivalent: read a plant image from disk.

use async_trait::async_trait;
use leafscan_application::{CaptureError, ImagePicker, ImageSource, MAX_IMAGE_BYTES};
use leafscan_domain::DataUri;
use std::path::{Path, PathBuf};

pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// MIME type by extension; only the formats the backend accepts.
fn mime_for(path: &Path) -> Result<&'static str, CaptureError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        other => Err(CaptureError::UnsupportedType(other.to_string())),
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn acquire(&self) -> Result<DataUri, CaptureError> {
        let mime = mime_for(&self.path)?;

        let metadata = tokio::fs::metadata(&self.path).await?;
        if metadata.len() > MAX_IMAGE_BYTES {
            return Err(CaptureError::TooLarge(metadata.len()));
        }

        let bytes = tokio::fs::read(&self.path).await?;
        Ok(DataUri::new(mime, bytes))
    }
}

/// Stateless file picker for interaction-time paths.
pub struct FilePicker;

#[async_trait]
impl ImagePicker for FilePicker {
    async fn pick(&self, path: &Path) -> Result<DataUri, CaptureError> {
        FileImageSource::new(path).acquire().await
    }
}
