use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// Network access used by the extractors. Any non-success status is an error.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
