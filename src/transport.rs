//! The HTTP seam between request construction and the network.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{GeocodeError, Result};
use crate::exec::check_status;

/// Sends a GET request and returns the full response body.
///
/// Implementations report failures as transport errors
/// ([`GeocodeError::HttpClient`], [`GeocodeError::Transport`] or
/// [`GeocodeError::Http`]). They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_get(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send_get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).send_get(url).await
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport honoring the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Wraps an existing `reqwest` client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, body.to_vec())
    }
}
