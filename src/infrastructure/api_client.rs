//! HTTP implementation of the catalog gateway
//!
//! Thin reqwest wrapper over the backend's REST contract. Success
//! bodies arrive wrapped in a `{ data: ... }` envelope except for the
//! identifier verification probe, which returns a bare boolean.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::gateway::{CatalogError, CatalogGateway};
use crate::domain::product::Product;
use crate::infrastructure::config::HttpConfig;

/// Success envelope used by every CRUD endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body shape on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed client for the `/bp/products` REST contract.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Build the client from configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let mut base_url =
            Url::parse(&config.base_url).context("Invalid catalog base URL")?;
        // Url::join treats a path without a trailing slash as a file.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|err| CatalogError::Transport {
                message: format!("invalid endpoint '{path}': {err}"),
            })
    }

    /// Decode a response, mapping non-2xx statuses to
    /// [`CatalogError::Backend`] with the server-provided message.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => fallback,
            };
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CatalogError::Decode {
                message: err.to_string(),
            })
    }
}

fn transport(err: reqwest::Error) -> CatalogError {
    CatalogError::Transport {
        message: err.to_string(),
    }
}

#[async_trait]
impl CatalogGateway for CatalogClient {
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("bp/products")?;
        debug!(%url, "fetching product list");
        let response = self.client.get(url).send().await.map_err(transport)?;
        Self::decode::<Envelope<Vec<Product>>>(response)
            .await
            .map(|envelope| envelope.data)
    }

    async fn create(&self, product: &Product) -> Result<Product, CatalogError> {
        let url = self.endpoint("bp/products")?;
        debug!(%url, id = %product.id, "creating product");
        let response = self
            .client
            .post(url)
            .json(product)
            .send()
            .await
            .map_err(transport)?;
        Self::decode::<Envelope<Product>>(response)
            .await
            .map(|envelope| envelope.data)
    }

    async fn update(&self, product: &Product) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("bp/products/{}", product.id))?;
        debug!(%url, "updating product");
        let response = self
            .client
            .put(url)
            .json(product)
            .send()
            .await
            .map_err(transport)?;
        Self::decode::<Envelope<Product>>(response)
            .await
            .map(|envelope| envelope.data)
    }

    async fn delete(&self, id: &str) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("bp/products/{id}"))?;
        debug!(%url, "deleting product");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        Self::decode::<Envelope<Product>>(response)
            .await
            .map(|envelope| envelope.data)
    }

    async fn id_exists(&self, id: &str) -> Result<bool, CatalogError> {
        let url = self.endpoint(&format!("bp/products/verification/{id}"))?;
        debug!(%url, "verifying identifier");
        let response = self.client.get(url).send().await.map_err(transport)?;
        Self::decode::<bool>(response).await
    }
}
