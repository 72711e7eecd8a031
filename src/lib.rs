//! News & Weather API - A caching gateway over NewsAPI and OpenWeatherMap
//!
//! Fetches from the upstream REST APIs, normalizes their payloads and serves
//! them through a Redis cache with an in-memory fallback.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod services;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{GatewayError, Result};
pub use tasks::{spawn_sweep_task, SweepTask};
