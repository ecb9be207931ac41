//! Typed views over the URL query string.
//!
//! Every page reads its state from the query string, so parsing and
//! serialisation live here with their defaults in one place.

use std::collections::HashMap;

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_OFFSET: usize = 0;

pub const SEARCH_PATH: &str = "/";
pub const ANALYTICS_PATH: &str = "/analytics";
pub const CRAWLED_SITES_PATH: &str = "/analytics/crawled_sites";

/// Parse a raw `a=1&b=2` query string into a map. Later duplicates win.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        Self {
            q: non_blank(params.get("q")),
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.q.as_deref()
    }
}

pub fn search_href(q: &str) -> String {
    format!("{}?q={}", SEARCH_PATH, urlencoding::encode(q))
}

pub fn crawled_sites_href(domain: &str) -> String {
    format!("{}?domain={}", CRAWLED_SITES_PATH, urlencoding::encode(domain))
}

/// Filter and window for the crawled URL listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawledSitesParams {
    pub domain: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for CrawledSitesParams {
    fn default() -> Self {
        Self {
            domain: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl CrawledSitesParams {
    /// Missing or malformed values fall back to the defaults. A zero limit is
    /// treated as missing so paging always advances.
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        let limit = params
            .get("limit")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&l| l > 0)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = params
            .get("offset")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_OFFSET);

        Self {
            domain: non_blank(params.get("domain")),
            limit,
            offset,
        }
    }

    pub fn from_query_str(raw: &str) -> Self {
        Self::from_map(&parse_query(raw))
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// Previous window, clamped at zero. Domain and limit are kept.
    pub fn prev(&self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self.clone()
        }
    }

    pub fn has_next(&self, total: u64) -> bool {
        (self.offset.saturating_add(self.limit) as u64) < total
    }

    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self.clone()
        }
    }

    /// Last index shown, given how many URLs the page actually holds.
    pub fn window_end(&self, returned: usize) -> usize {
        self.offset.saturating_add(returned.min(self.limit))
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(domain) = &self.domain {
            serializer.append_pair("domain", domain);
        }
        serializer
            .append_pair("limit", &self.limit.to_string())
            .append_pair("offset", &self.offset.to_string());
        serializer.finish()
    }

    pub fn href(&self) -> String {
        format!("{}?{}", CRAWLED_SITES_PATH, self.to_query_string())
    }
}
