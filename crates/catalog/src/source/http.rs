//! Remote catalog source speaking plain JSON over HTTP.
//!
//! Endpoints:
//! - `GET  {base}/products` - full pre-ranked product list
//! - `POST {base}/products/{id}/pin` - mark a product pinned
//! - `POST {base}/products/{id}/unpin` - clear the pinned mark
//!
//! Authentication is an optional bearer token. Responses are read as text
//! before parsing so malformed payloads leave a useful diagnostic behind.

use std::sync::Arc;

use glowcart_core::{Product, ProductId};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::ProductSource;
use crate::error::{FetchError, UpdateError};

/// Client for a remote catalog API.
#[derive(Clone)]
pub struct HttpSource {
    inner: Arc<HttpSourceInner>,
}

struct HttpSourceInner {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HttpSource {
    /// Create a new client for `base_url`, optionally authenticating with a
    /// bearer token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: Option<SecretString>) -> Self {
        let base_url = base_url.into();
        Self {
            inner: Arc::new(HttpSourceInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                api_token,
            }),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a request and normalize transport, throttling, and status
    /// failures into [`FetchError`]; returns the response body on success.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, FetchError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FetchError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body, 500),
                "Catalog API returned non-success status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        Ok(body)
    }

    async fn mutate_pin(&self, id: &ProductId, action: &str) -> Result<(), UpdateError> {
        let url = format!("{}/products/{id}/{action}", self.inner.base_url);
        let request = self.inner.client.post(&url);

        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(FetchError::Status { status: 404, .. }) => {
                Err(UpdateError::UnknownProduct(id.clone()))
            }
            Err(FetchError::Status { status, message }) => Err(UpdateError::Rejected(format!(
                "HTTP {status}: {message}"
            ))),
            Err(err) => Err(UpdateError::Transport(err)),
        }
    }
}

impl ProductSource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/products", self.inner.base_url);
        let body = self.send(self.inner.client.get(&url)).await?;

        match serde_json::from_str(&body) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&body, 500),
                    "Failed to parse catalog feed"
                );
                Err(FetchError::Parse(e))
            }
        }
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn pin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.mutate_pin(id, "pin").await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn unpin_product(&self, id: &ProductId) -> Result<(), UpdateError> {
        self.mutate_pin(id, "unpin").await
    }
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
