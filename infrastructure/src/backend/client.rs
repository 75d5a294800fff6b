//! HTTP client wrapper for the classification/auth backend.
//!
//! Every request goes through [`ApiClient`]: the bearer token is read from
//! the token store and attached per request (so a login during the process
//! lifetime takes effect immediately), and responses are normalized into
//! [`ApiError`], including the backend's convention of returning 200 with
//! an `error` field in the body for some failures.

use super::error::ApiError;
use leafscan_application::TokenStore;
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn url_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Url, ApiError> {
        reqwest::Url::parse_with_params(&self.url(path), query)
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        debug!(path, "GET");
        let request = self.authorize(self.http.get(self.url(path)));
        Self::handle(request.send().await).await
    }

    /// GET with query parameters. Values are percent-encoded, so caller
    /// input cannot corrupt the query string.
    pub async fn get_json_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        debug!(path, "GET");
        let url = self.url_with_query(path, query)?;
        let request = self.authorize(self.http.get(url));
        Self::handle(request.send().await).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, ApiError> {
        debug!(path, "POST");
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        Self::handle(request.send().await).await
    }

    /// POST a multipart form. The content type (with boundary) is set by
    /// reqwest, never manually.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        debug!(path, "POST multipart");
        let request = self.authorize(self.http.post(self.url(path)).multipart(form));
        Self::handle(request.send().await).await
    }

    async fn handle(response: Result<Response, reqwest::Error>) -> Result<Value, ApiError> {
        let response = response.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        // Some endpoints (logout, profile image) legitimately return an
        // empty body.
        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        if let Some(message) = error_in_body(&value) {
            return Err(ApiError::Server(message));
        }
        Ok(value)
    }
}

/// Extract a human-readable message from an error response body, trying the
/// `message` then `error` fields of a JSON object.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error"] {
        if let Some(s) = value.get(key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}

/// A 200-status body containing a non-null `error` field is a failure.
fn error_in_body(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    if error.is_null() {
        return None;
    }
    Some(
        error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
    )
}
