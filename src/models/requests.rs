//! Request DTOs for the gateway API
//!
//! Query strings accepted by the news and weather endpoints.

use serde::Deserialize;

/// Query for `GET /api/news`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    /// Optional search term; absent or empty means top headlines
    #[serde(default)]
    pub search: Option<String>,
}

impl NewsQuery {
    /// The search term, if one was actually given.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Query for `GET /api/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherQuery {
    /// City name, e.g. "London"
    pub location: String,
    /// Forecast instead of current conditions
    #[serde(default)]
    pub forecast: bool,
}

impl WeatherQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.location.trim().is_empty() {
            return Some("Location cannot be empty".to_string());
        }
        None
    }
}
