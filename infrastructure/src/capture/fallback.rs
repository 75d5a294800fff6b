//! Graceful degradation from camera to file selection.
//!
//! Mirrors the UI behavior: a missing or failing camera device does not
//! abort the flow when the user also provided a file.

use async_trait::async_trait;
use leafscan_application::{CaptureError, ImageSource};
use leafscan_domain::DataUri;
use std::sync::Arc;
use tracing::warn;

pub struct FallbackImageSource {
    primary: Arc<dyn ImageSource>,
    fallback: Arc<dyn ImageSource>,
}

impl FallbackImageSource {
    pub fn new(primary: Arc<dyn ImageSource>, fallback: Arc<dyn ImageSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ImageSource for FallbackImageSource {
    async fn acquire(&self) -> Result<DataUri, CaptureError> {
        match self.primary.acquire().await {
            Ok(uri) => Ok(uri),
            Err(e) => {
                warn!("camera unavailable ({e}), falling back to file selection");
                self.fallback.acquire().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<DataUri, CaptureError>);

    #[async_trait]
    impl ImageSource for Fixed {
        async fn acquire(&self) -> Result<DataUri, CaptureError> {
            match &self.0 {
                Ok(uri) => Ok(uri.clone()),
                Err(_) => Err(CaptureError::NoCamera),
            }
        }
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let source = FallbackImageSource::new(
            Arc::new(Fixed(Ok(DataUri::new("image/jpeg", vec![1])))),
            Arc::new(Fixed(Ok(DataUri::new("image/png", vec![2])))),
        );
        assert_eq!(source.acquire().await.unwrap().mime(), "image/jpeg");
    }

    #[tokio::test]
    async fn primary_failure_uses_fallback() {
        let source = FallbackImageSource::new(
            Arc::new(Fixed(Err(CaptureError::NoCamera))),
            Arc::new(Fixed(Ok(DataUri::new("image/png", vec![2])))),
        );
        assert_eq!(source.acquire().await.unwrap().mime(), "image/png");
    }

    #[tokio::test]
    async fn both_failing_reports_the_fallback_error() {
        let source = FallbackImageSource::new(
            Arc::new(Fixed(Err(CaptureError::NoCamera))),
            Arc::new(Fixed(Err(CaptureError::NoCamera))),
        );
        assert!(source.acquire().await.is_err());
    }
}
