//! Upstream Module
//!
//! Clients for the third-party news and weather REST APIs.

mod client;
mod transport;

pub use client::{ApiProfile, UpstreamClient, NEWS_API, WEATHER_API};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
