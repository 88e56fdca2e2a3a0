//! Transport seam: the component that actually issues HTTP requests.

pub mod http;

pub use http::HttpTransport;

use crate::request::RequestConfig;
use crate::types::ApiResponse;
use async_trait::async_trait;

/// Issues one HTTP request per call and returns the parsed success envelope.
///
/// Implementations own everything below the endpoint table: base URL,
/// authentication, timeouts, status handling. Failures are reported through
/// `Self::Error`, which callers of the API receive unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Must accept JSON serialization failures so payload encoding errors can
    /// surface through the same channel.
    type Error: From<serde_json::Error> + Send;

    async fn request(&self, path: &str, config: RequestConfig) -> Result<ApiResponse, Self::Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    type Error = T::Error;

    async fn request(&self, path: &str, config: RequestConfig) -> Result<ApiResponse, Self::Error> {
        (**self).request(path, config).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
