use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, Response};
use std::time::Duration;
use tracing::debug;

use crate::application::ports::{FetchError, PageFetcher};

/// Plain GET client; one fixed timeout and user agent per instance.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
