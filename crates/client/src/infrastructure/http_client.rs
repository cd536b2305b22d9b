//! HTTP adapter for the ER Builds site
//!
//! Native builds use `reqwest`; the browser build goes through `gloo-net` so
//! the session cookie rides along with every request.

use serde_json::Value;

use erbuilds_shared::{ErrorResponse, AJAX_HEADER};

use crate::ports::outbound::{ApiError, FormPost, SiteApiPort};

/// Site API adapter
#[derive(Clone)]
pub struct SiteApiAdapter {
    base_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl SiteApiAdapter {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The browser applies its own timeouts; `timeout_ms` is accepted for parity.
    #[cfg(target_arch = "wasm32")]
    pub fn new(base_url: &str, _timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

/// Message of a non-2xx answer: the `error` field when the body carries one.
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or(body)
}

fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = error_message(response.text().await.unwrap_or_default());
        return Err(ApiError::HttpError {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::ParseError(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl SiteApiPort for SiteApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .header(AJAX_HEADER.0, AJAX_HEADER.1)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }

    async fn post_form(&self, request: FormPost) -> Result<Value, ApiError> {
        let mut builder = self
            .client
            .post(self.url(&request.path))
            .header(AJAX_HEADER.0, AJAX_HEADER.1)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encode_form(&request.fields));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(path = %request.path, "POST form");
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_json(response: gloo_net::http::Response) -> Result<Value, ApiError> {
    if !response.ok() {
        let status = response.status();
        let message = error_message(response.text().await.unwrap_or_default());
        return Err(ApiError::HttpError { status, message });
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::ParseError(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl SiteApiPort for SiteApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = gloo_net::http::Request::get(&self.url(path))
            .header(AJAX_HEADER.0, AJAX_HEADER.1)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }

    async fn post_form(&self, request: FormPost) -> Result<Value, ApiError> {
        let mut builder = gloo_net::http::Request::post(&self.url(&request.path))
            .header(AJAX_HEADER.0, AJAX_HEADER.1)
            .header("Content-Type", "application/x-www-form-urlencoded");
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        tracing::debug!(path = %request.path, "POST form");
        let response = builder
            .body(encode_form(&request.fields))
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }
}
