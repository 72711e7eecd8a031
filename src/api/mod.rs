//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /health` - Health check endpoint
//! - `GET /api/news` - News headlines or search
//! - `GET /api/weather` - Current weather or forecast

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, PROCESS_TIME_HEADER};
