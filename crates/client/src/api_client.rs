//! HTTP API client with bearer-token support.

use beasiswa_shared::ApiError;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::log_debug;

/// HTTP client for the scholarship backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn builder(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        log_debug!("{} {}", method, url);
        let rb = self.client.request(method, &url);
        match bearer {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Send the request and return the raw body of a successful response.
    async fn execute(rb: RequestBuilder) -> Result<String, ApiError> {
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        Ok(text)
    }

    pub(crate) fn decode<TRes: DeserializeOwned>(text: &str) -> Result<TRes, ApiError> {
        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    /// Make a GET request
    pub async fn get_json<TRes: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<TRes, ApiError> {
        let text = Self::execute(self.builder(Method::GET, path, bearer)).await?;
        Self::decode(&text)
    }

    /// Make a POST request with JSON body and return the raw success body
    pub async fn post_text<TReq: Serialize>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &TReq,
    ) -> Result<String, ApiError> {
        self.send_text(Method::POST, path, bearer, body).await
    }

    /// Make a PUT request with JSON body; any 2xx counts, whatever the body
    pub async fn put_ack<TReq: Serialize>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &TReq,
    ) -> Result<(), ApiError> {
        self.send_text(Method::PUT, path, bearer, body).await?;
        Ok(())
    }

    /// Make a POST request with JSON body; any 2xx counts, whatever the body
    pub async fn post_ack<TReq: Serialize>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &TReq,
    ) -> Result<(), ApiError> {
        self.send_text(Method::POST, path, bearer, body).await?;
        Ok(())
    }

    async fn send_text<TReq: Serialize>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: &TReq,
    ) -> Result<String, ApiError> {
        let body_bytes =
            serde_json::to_vec(body).map_err(|e| ApiError::Deserialize(e.to_string()))?;

        let rb = self
            .builder(method, path, bearer)
            .body(body_bytes)
            .header("Content-Type", "application/json");

        Self::execute(rb).await
    }

    /// Make a DELETE request; any response body is ignored
    pub async fn delete(&self, path: &str, bearer: Option<&str>) -> Result<(), ApiError> {
        Self::execute(self.builder(Method::DELETE, path, bearer)).await?;
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
