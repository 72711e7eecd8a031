//! Response DTOs for the gateway API
//!
//! Normalized news and weather results, plus the health and root bodies.
//! Results are also the values stored in the cache, serialized as JSON.

use serde::{Deserialize, Serialize};

/// Unit label carried by every weather result
pub const METRIC_UNIT: &str = "metric";

// == News ==
/// One normalized article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: String,
    /// Source name, "Unknown" when upstream omits it
    pub source: String,
}

/// Body of `GET /api/news`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResult {
    /// Always `articles.len()`
    pub count: usize,
    pub articles: Vec<NewsArticle>,
}

impl NewsResult {
    pub fn new(articles: Vec<NewsArticle>) -> Self {
        Self {
            count: articles.len(),
            articles,
        }
    }
}

// == Weather ==
/// Conditions for one point in time (current) or one calendar day (forecast).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    /// e.g. "Sat January 01 2022"
    pub date: String,
    /// Main condition, e.g. "Clear"
    #[serde(rename = "main")]
    pub condition: String,
    /// Degrees Celsius, rounded to 2 decimals
    #[serde(rename = "temp")]
    pub temperature_celsius: f64,
    pub description: Option<String>,
}

/// Body of `GET /api/weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub count: usize,
    /// Always "metric"
    pub unit: String,
    /// Location exactly as the caller gave it
    pub location: String,
    pub data: Vec<WeatherPoint>,
}

impl WeatherResult {
    pub fn new(location: impl Into<String>, data: Vec<WeatherPoint>) -> Self {
        Self {
            count: data.len(),
            unit: METRIC_UNIT.to_string(),
            location: location.into(),
            data,
        }
    }
}

// == Service Info ==
/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub version: String,
    /// Active cache backend, "redis" or "memory"
    pub cache: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cache: cache.into(),
        }
    }
}

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub health: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "Welcome to News & Weather API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            health: "/health".to_string(),
        }
    }
}
