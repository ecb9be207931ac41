use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub score: f64,
    /// Crawl time, Unix milliseconds.
    #[serde(default)]
    pub scraped_at: i64,
}

impl SearchResult {
    pub fn scraped_at_utc(&self) -> Option<DateTime<Utc>> {
        if self.scraped_at <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.scraped_at)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub took_ms: f64,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEntry {
    pub domain: String,
    pub count: u64,
}

/// One window of the crawled URL listing. `total` counts the whole
/// filtered collection, not this page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CrawledSitesPage {
    pub urls: Vec<String>,
    pub total: u64,
}
