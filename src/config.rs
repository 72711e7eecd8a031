//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::time::Duration;

pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Missing API keys are not an error here; they surface per request when the
/// corresponding service is invoked.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Primary cache connection string, `None` runs the in-memory cache only
    pub redis_url: Option<String>,
    /// NewsAPI credential
    pub news_api_key: Option<String>,
    /// OpenWeatherMap credential
    pub weather_api_key: Option<String>,
    pub news_base_url: String,
    pub weather_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Primary cache connect and per-command timeout in seconds
    pub cache_connect_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `REDIS_URL` - Primary cache URL, empty disables it (default: redis://localhost:6379)
    /// - `NEWSAPI_KEY` - NewsAPI key (default: unset)
    /// - `OPENWEATHER_API_KEY` - OpenWeatherMap key (default: unset)
    /// - `NEWSAPI_BASE_URL` / `OPENWEATHER_BASE_URL` - Upstream base URLs
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `SWEEP_INTERVAL` - Fallback cache sweep frequency in seconds (default: 300)
    /// - `CACHE_CONNECT_TIMEOUT` - Redis connect and command timeout in seconds (default: 2)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            redis_url: match lookup("REDIS_URL") {
                Some(v) if v.trim().is_empty() => None,
                Some(v) => Some(v),
                None => defaults.redis_url,
            },
            news_api_key: non_empty("NEWSAPI_KEY"),
            weather_api_key: non_empty("OPENWEATHER_API_KEY"),
            news_base_url: non_empty("NEWSAPI_BASE_URL").unwrap_or(defaults.news_base_url),
            weather_base_url: non_empty("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.weather_base_url),
            upstream_timeout: lookup("UPSTREAM_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.upstream_timeout),
            sweep_interval: lookup("SWEEP_INTERVAL")
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            cache_connect_timeout: lookup("CACHE_CONNECT_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_connect_timeout),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn cache_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_connect_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            redis_url: Some(DEFAULT_REDIS_URL.to_string()),
            news_api_key: None,
            weather_api_key: None,
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            upstream_timeout: 10,
            sweep_interval: 300,
            cache_connect_timeout: 2,
        }
    }
}
