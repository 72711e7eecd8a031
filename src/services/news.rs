//! News aggregation over NewsAPI.

use std::sync::Arc;

use tracing::info;

use super::read_through;
use crate::cache::{keys, CacheStore};
use crate::error::{GatewayError, Result};
use crate::models::NewsResult;
use crate::normalize::news::parse_response;
use crate::upstream::UpstreamClient;

/// Top headlines, with or without a term: 15 minutes
pub const HEADLINES_TTL: u64 = 900;
/// Full-text search: 10 minutes
pub const SEARCH_TTL: u64 = 600;

const HEADLINES_COUNTRY: &str = "us";
const PAGE_SIZE: &str = "20";

#[derive(Debug, Clone)]
pub struct NewsService {
    upstream: UpstreamClient,
    cache: Arc<CacheStore>,
}

impl NewsService {
    pub fn new(upstream: UpstreamClient, cache: Arc<CacheStore>) -> Self {
        Self { upstream, cache }
    }

    /// Full-text search for a non-empty term, top headlines otherwise.
    pub async fn get_news(&self, search: Option<&str>) -> Result<NewsResult> {
        match search.filter(|s| !s.is_empty()) {
            Some(term) => self.search_news(term).await,
            None => self.get_top_headlines(None).await,
        }
    }

    /// `top-headlines`. Without a term it is scoped to the US; with one the
    /// country filter is dropped, since the provider rejects both together.
    pub async fn get_top_headlines(&self, search: Option<&str>) -> Result<NewsResult> {
        let key = keys::news_headlines(search);

        read_through(&self.cache, &key, HEADLINES_TTL, || async {
            let mut params = vec![("pageSize", PAGE_SIZE.to_string())];
            match search {
                Some(term) => params.push(("q", term.to_string())),
                None => params.push(("country", HEADLINES_COUNTRY.to_string())),
            }

            let body = self.upstream.fetch("top-headlines", &params).await?;
            let result = parse_response(&body);
            info!(count = result.count, "Fetched top headlines");
            Ok::<_, GatewayError>(result)
        })
        .await
    }

    /// `everything`, newest first.
    pub async fn search_news(&self, query: &str) -> Result<NewsResult> {
        let key = keys::news_search(query);

        read_through(&self.cache, &key, SEARCH_TTL, || async {
            let params = [
                ("q", query.to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
            ];

            let body = self.upstream.fetch("everything", &params).await?;
            let result = parse_response(&body);
            info!(count = result.count, query, "Fetched news search");
            Ok::<_, GatewayError>(result)
        })
        .await
    }
}
