//! API Handlers
//!
//! HTTP request handlers for the gateway endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::{
    HealthResponse, NewsQuery, NewsResult, RootResponse, WeatherQuery, WeatherResult,
};
use crate::services::{NewsService, WeatherService};
use crate::upstream::{HttpTransport, ReqwestTransport, UpstreamClient, NEWS_API, WEATHER_API};

/// Application state shared across all handlers.
///
/// Both services share one `CacheStore`.
#[derive(Clone)]
pub struct AppState {
    pub news: Arc<NewsService>,
    pub weather: Arc<WeatherService>,
    pub cache: Arc<CacheStore>,
}

impl AppState {
    /// Wires both services onto the given cache and HTTP transport.
    pub fn new(
        config: &Config,
        cache: Arc<CacheStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let news = UpstreamClient::new(
            NEWS_API,
            &config.news_base_url,
            config.news_api_key.clone(),
            transport.clone(),
        );
        let weather = UpstreamClient::new(
            WEATHER_API,
            &config.weather_base_url,
            config.weather_api_key.clone(),
            transport,
        );

        for client in [&news, &weather] {
            if !client.is_configured() {
                warn!("{} API key not set, requests will fail", client.profile().provider);
            }
        }

        Self {
            news: Arc::new(NewsService::new(news, cache.clone())),
            weather: Arc::new(WeatherService::new(weather, cache.clone())),
            cache,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects the cache (falling back to memory-only when Redis is
    /// unreachable) and builds the reqwest transport.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.upstream_timeout())
            .map_err(|e| GatewayError::Internal(format!("HTTP client setup failed: {}", e)))?;
        let cache =
            CacheStore::connect(config.redis_url.as_deref(), config.cache_connect_timeout()).await;

        Ok(Self::new(config, Arc::new(cache), Arc::new(transport)))
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// Handler for GET /health
///
/// Reports which cache backend is serving requests.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.backend_name()))
}

/// Handler for GET /api/news
///
/// Full-text search when `search` is given, top headlines otherwise.
pub async fn news_handler(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResult>> {
    let result = state.news.get_news(query.term()).await;
    if let Err(e) = &result {
        warn!("News request failed: {}", e);
    }

    result.map(Json)
}

/// Handler for GET /api/weather
///
/// Current conditions, or the daily forecast when `forecast=true`. The
/// location is passed on exactly as the caller sent it.
pub async fn weather_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResult>> {
    let Query(query) = query.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    if let Some(error_msg) = query.validate() {
        return Err(GatewayError::InvalidRequest(error_msg));
    }

    let location = query.location.as_str();
    let result = if query.forecast {
        state.weather.get_weather_forecast(location).await
    } else {
        state.weather.get_current_weather(location).await
    };
    if let Err(e) = &result {
        warn!(location, "Weather request failed: {}", e);
    }

    result.map(Json)
}
