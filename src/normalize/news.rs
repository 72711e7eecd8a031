//! NewsAPI payload normalization.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::{NewsArticle, NewsResult};

pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One upstream article as NewsAPI sends it.
///
/// Missing fields take defaults. A field that is present with the wrong
/// type (`null` title, non-object source, ...) fails deserialization and
/// the record is dropped.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
    #[serde(default)]
    source: RawSource,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default = "unknown_source")]
    name: String,
}

impl Default for RawSource {
    fn default() -> Self {
        Self {
            name: unknown_source(),
        }
    }
}

fn unknown_source() -> String {
    UNKNOWN_SOURCE.to_string()
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title,
            description: raw.description,
            url: raw.url,
            published_at: raw.published_at,
            source: raw.source.name,
        }
    }
}

/// Parses each record independently, skipping the ones that are not valid
/// articles. Output order follows input order.
pub fn parse_articles(records: &[Value]) -> Vec<NewsArticle> {
    records
        .iter()
        .filter_map(|record| match RawArticle::deserialize(record) {
            Ok(raw) => Some(NewsArticle::from(raw)),
            Err(e) => {
                debug!("Skipping invalid article: {}", e);
                None
            }
        })
        .collect()
}

/// Normalizes a whole NewsAPI response body. A missing or non-array
/// `articles` field yields an empty result.
pub fn parse_response(body: &Value) -> NewsResult {
    let records = body
        .get("articles")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    NewsResult::new(parse_articles(records))
}
