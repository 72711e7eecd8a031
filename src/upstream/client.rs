//! Upstream API client
//!
//! One `UpstreamClient` per third-party API. It checks the credential,
//! attaches it as a query parameter and maps every transport failure to
//! `GatewayError::UpstreamFailed`. It never retries.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::HttpTransport;
use crate::error::{GatewayError, Result};

/// Static description of a third-party API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiProfile {
    /// Provider name used in "not configured" messages
    pub provider: &'static str,
    /// What is being fetched, used in "failed to fetch" messages
    pub subject: &'static str,
    /// Query parameter carrying the API key
    pub key_param: &'static str,
}

pub const NEWS_API: ApiProfile = ApiProfile {
    provider: "NewsAPI",
    subject: "news",
    key_param: "apiKey",
};

pub const WEATHER_API: ApiProfile = ApiProfile {
    provider: "OpenWeatherMap",
    subject: "weather data",
    key_param: "appid",
};

#[derive(Clone)]
pub struct UpstreamClient {
    profile: ApiProfile,
    base_url: String,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("provider", &self.profile.provider)
            .field("base_url", &self.base_url)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl UpstreamClient {
    pub fn new(
        profile: ApiProfile,
        base_url: impl Into<String>,
        api_key: Option<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            profile,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            transport,
        }
    }

    pub fn profile(&self) -> ApiProfile {
        self.profile
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// GETs `<base_url>/<endpoint>` with `params` plus the API key.
    ///
    /// # Errors
    /// - `NotConfigured` when no API key is set; no request is made
    /// - `UpstreamFailed` on timeout, connection error, non-2xx or a body
    ///   that is not JSON
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::NotConfigured(format!("{} API key not configured", self.profile.provider))
        })?;

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        query.push((self.profile.key_param.to_string(), api_key.to_string()));

        debug!(provider = self.profile.provider, %url, "Fetching upstream");

        self.transport.get_json(&url, &query).await.map_err(|e| {
            warn!(provider = self.profile.provider, %url, "Upstream fetch failed: {}", e);
            GatewayError::UpstreamFailed {
                subject: self.profile.subject.to_string(),
                cause: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every request and answers with a canned result.
    struct RecordingTransport {
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
        fail: bool,
    }

    impl RecordingTransport {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(vec![]),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(vec![]),
                fail: true,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn get_json(
            &self,
            url: &str,
            query: &[(String, String)],
        ) -> std::result::Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), query.to_vec()));
            if self.fail {
                Err(TransportError::Other("operation timed out".to_string()))
            } else {
                Ok(json!({"status": "ok"}))
            }
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network_call() {
        let transport = RecordingTransport::ok();
        let client = UpstreamClient::new(NEWS_API, "http://news.test/v2", None, transport.clone());

        let err = client.fetch("top-headlines", &[]).await.unwrap_err();

        assert!(matches!(err, GatewayError::NotConfigured(_)));
        assert!(err.is_service_unavailable());
        assert_eq!(err.to_string(), "NewsAPI API key not configured");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_key_counts_as_missing() {
        let transport = RecordingTransport::ok();
        let client = UpstreamClient::new(
            WEATHER_API,
            "http://weather.test",
            Some(String::new()),
            transport.clone(),
        );

        assert!(!client.is_configured());
        let err = client.fetch("weather", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "OpenWeatherMap API key not configured");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_key_is_sent_as_query_parameter() {
        let transport = RecordingTransport::ok();
        let client = UpstreamClient::new(
            WEATHER_API,
            "http://weather.test/data/2.5/",
            Some("k123".to_string()),
            transport.clone(),
        );

        let body = client
            .fetch("weather", &[("q", "London".to_string())])
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        let calls = transport.calls.lock().unwrap();
        let (url, query) = &calls[0];
        assert_eq!(url, "http://weather.test/data/2.5/weather");
        assert!(query.contains(&("q".to_string(), "London".to_string())));
        assert!(query.contains(&("appid".to_string(), "k123".to_string())));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_upstream_failed() {
        let transport = RecordingTransport::failing();
        let client = UpstreamClient::new(
            WEATHER_API,
            "http://weather.test",
            Some("k".to_string()),
            transport.clone(),
        );

        let err = client.fetch("weather", &[]).await.unwrap_err();

        assert!(err.is_service_unavailable());
        assert_eq!(
            err.to_string(),
            "Failed to fetch weather data: operation timed out"
        );
        // No automatic retry
        assert_eq!(transport.call_count(), 1);
    }
}
