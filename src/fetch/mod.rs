//! Network access.
//!
//! The pipeline only sees the [`Fetcher`] capability, so alternate sources
//! (a cache, a recorded fixture, a different HTTP stack) can be swapped in
//! without touching extraction logic.

pub mod decode;
pub mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Performs one bounded GET request and returns the decoded body.
///
/// Implementations must not retry; retry policy belongs to the caller.
/// Dropping the returned future aborts the request.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, failing with [`FetchError::Timeout`] once `timeout` elapses.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        (**self).fetch(url, timeout).await
    }
}
