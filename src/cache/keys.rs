//! Cache key construction.
//!
//! Keys are `<domain>:<operation>:<argument>`. Identical logical requests
//! always produce identical keys.

/// Placeholder argument for unfiltered top headlines.
pub const TOP_HEADLINES: &str = "top";

/// `news:headlines:<term>`, or `news:headlines:top` without a term.
pub fn news_headlines(search: Option<&str>) -> String {
    format!("news:headlines:{}", search.unwrap_or(TOP_HEADLINES))
}

/// `news:search:<query>`
pub fn news_search(query: &str) -> String {
    format!("news:search:{}", query)
}

/// `weather:current:<location lowercased>`
pub fn weather_current(location: &str) -> String {
    format!("weather:current:{}", location.to_lowercase())
}

/// `weather:forecast:<location lowercased>`
pub fn weather_forecast(location: &str) -> String {
    format!("weather:forecast:{}", location.to_lowercase())
}
