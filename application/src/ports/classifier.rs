//! Image classifier port
//!
//! Defines the interface for submitting a plant image to the disease
//! classification backend. The chat manager depends only on this contract;
//! the HTTP adapter lives in the infrastructure layer.

use super::gateway::GatewayError;
use async_trait::async_trait;
use leafscan_domain::{DataUri, Diagnosis};

/// A decoded image ready for upload as a named multipart file part.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Package a decoded data URI under the upload filename the backend
    /// expects (`chat-image.<ext>`).
    pub fn from_data_uri(uri: &DataUri) -> Self {
        Self {
            file_name: format!("chat-image.{}", uri.extension()),
            mime: uri.mime().to_string(),
            bytes: uri.bytes().to_vec(),
        }
    }
}

/// Gateway for disease classification
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Submit an image (and optional accompanying note) for classification.
    async fn classify(
        &self,
        image: ImagePayload,
        note: Option<&str>,
    ) -> Result<Diagnosis, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_from_data_uri_names_the_file_by_extension() {
        let uri = DataUri::new("image/png", vec![1, 2, 3]);
        let payload = ImagePayload::from_data_uri(&uri);
        assert_eq!(payload.file_name, "chat-image.png");
        assert_eq!(payload.mime, "image/png");
        assert_eq!(payload.bytes, vec![1, 2, 3]);
    }
}
