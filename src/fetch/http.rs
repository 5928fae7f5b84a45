//! `reqwest`-backed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::decode::decode_body;
use super::Fetcher;
use crate::error::FetchError;
use crate::Options;

/// HTTP fetcher sharing one connection pool across calls.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher sending `options.user_agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialised.
    pub fn new(options: &Options) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&options.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!(%url, ?timeout, "GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(classify)?;
        debug!(%url, bytes = body.len(), "response received");

        Ok(decode_body(&body, content_type.as_deref()))
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err.to_string())
    }
}
