//! Request and Response models for the gateway API
//!
//! This module defines the DTOs used for query parsing and for the
//! normalized results that are returned and cached.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{NewsQuery, WeatherQuery};
pub use responses::{
    HealthResponse, NewsArticle, NewsResult, RootResponse, WeatherPoint, WeatherResult,
    METRIC_UNIT,
};
