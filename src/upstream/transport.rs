//! HTTP transport used by the upstream clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to an upstream API
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request, status or body decoding failed
    #[error("{0}")]
    Http(reqwest::Error),

    /// Failure reported by a non-reqwest transport
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the API key in its query string
        TransportError::Http(err.without_url())
    }
}

/// Issues a GET and decodes the JSON body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, url: &str, query: &[(String, String)])
        -> Result<Value, TransportError>;
}

/// `reqwest`-backed transport with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let query = vec![("appid".to_string(), "secret-key".to_string())];

        let err = transport
            .get_json("http://127.0.0.1:1/weather", &query)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Http(_)));
        assert!(!err.to_string().contains("secret-key"));
    }
}
