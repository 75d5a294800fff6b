//! Disease classification over `/detection/upload`.

use super::client::ApiClient;
use super::protocol::UploadResponse;
use async_trait::async_trait;
use leafscan_application::{GatewayError, ImageClassifier, ImagePayload};
use leafscan_domain::Diagnosis;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

pub struct HttpImageClassifier {
    client: Arc<ApiClient>,
}

impl HttpImageClassifier {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

pub(super) fn image_form(image: ImagePayload, note: Option<&str>) -> Result<Form, GatewayError> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.mime)
        .map_err(|e| GatewayError::Network(format!("could not build upload: {e}")))?;

    let mut form = Form::new().part("image", part);
    if let Some(note) = note {
        form = form.text("message", note.to_string());
    }
    Ok(form)
}

#[async_trait]
impl ImageClassifier for HttpImageClassifier {
    async fn classify(
        &self,
        image: ImagePayload,
        note: Option<&str>,
    ) -> Result<Diagnosis, GatewayError> {
        let form = image_form(image, note)?;
        let value = self.client.post_multipart("/detection/upload", form).await?;

        let response: UploadResponse =
            serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(response.into_diagnosis())
    }
}
