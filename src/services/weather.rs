//! Weather aggregation over OpenWeatherMap.

use std::sync::Arc;

use tracing::info;

use super::read_through;
use crate::cache::{keys, CacheStore};
use crate::error::{GatewayError, Result};
use crate::models::WeatherResult;
use crate::normalize::weather::{parse_current, parse_forecast};
use crate::upstream::UpstreamClient;

/// Current conditions: 10 minutes
pub const CURRENT_TTL: u64 = 600;
/// Forecast: 30 minutes
pub const FORECAST_TTL: u64 = 1800;

#[derive(Debug, Clone)]
pub struct WeatherService {
    upstream: UpstreamClient,
    cache: Arc<CacheStore>,
}

impl WeatherService {
    pub fn new(upstream: UpstreamClient, cache: Arc<CacheStore>) -> Self {
        Self { upstream, cache }
    }

    pub async fn get_current_weather(&self, location: &str) -> Result<WeatherResult> {
        let key = keys::weather_current(location);

        read_through(&self.cache, &key, CURRENT_TTL, || async {
            let body = self
                .upstream
                .fetch("weather", &[("q", location.to_string())])
                .await?;
            let result = parse_current(&body, location)?;
            info!(location, "Fetched current weather");
            Ok::<_, GatewayError>(result)
        })
        .await
    }

    pub async fn get_weather_forecast(&self, location: &str) -> Result<WeatherResult> {
        let key = keys::weather_forecast(location);

        read_through(&self.cache, &key, FORECAST_TTL, || async {
            let body = self
                .upstream
                .fetch("forecast", &[("q", location.to_string())])
                .await?;
            let result = parse_forecast(&body, location)?;
            info!(location, days = result.count, "Fetched weather forecast");
            Ok::<_, GatewayError>(result)
        })
        .await
    }
}
