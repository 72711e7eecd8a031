//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, news_handler, root_handler, weather_handler, AppState};

/// Response header carrying the handling time in seconds
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /health` - Health check endpoint
/// - `GET /api/news?search=` - Top headlines or full-text search
/// - `GET /api/weather?location=&forecast=` - Current weather or forecast
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
/// - Process time: `x-process-time` header on every response
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/news", get(news_handler))
        .route("/api/weather", get(weather_handler))
        .layer(middleware::from_fn(process_time))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn process_time(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;

    let elapsed = format!("{:.4}", started.elapsed().as_secs_f64());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::config::Config;
    use crate::upstream::{HttpTransport, TransportError};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn get_json(
            &self,
            _url: &str,
            _query: &[(String, String)],
        ) -> Result<Value, TransportError> {
            Err(TransportError::Other("connection refused".to_string()))
        }
    }

    fn create_test_app() -> Router {
        let config = Config {
            news_api_key: Some("k".to_string()),
            ..Config::default()
        };
        let cache = Arc::new(CacheStore::in_memory());
        create_router(AppState::new(&config, cache, Arc::new(Unreachable)))
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let elapsed = response.headers()[PROCESS_TIME_HEADER].to_str().unwrap();
        assert!(elapsed.parse::<f64>().is_ok());
        assert_eq!(elapsed.split('.').nth(1).map(str::len), Some(4));
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        assert_eq!(get_status("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_service_unavailable() {
        assert_eq!(get_status("/api/news").await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_weather_without_key_is_service_unavailable() {
        assert_eq!(
            get_status("/api/weather?location=London").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_weather_requires_location() {
        assert_eq!(get_status("/api/weather").await, StatusCode::BAD_REQUEST);
        assert_eq!(get_status("/api/weather?location=%20").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(get_status("/api/stocks").await, StatusCode::NOT_FOUND);
    }
}
