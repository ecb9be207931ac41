use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::data_models::{AnalyticsEntry, CrawledSitesPage, SearchResponse};
use crate::query_params::CrawledSitesParams;

pub mod endpoints {
    pub const SEARCH: &str = "/api/search";
    pub const ANALYTICS: &str = "/api/analytics";
    pub const CRAWLED_URLS: &str = "/api/crawled_urls";
    pub const HEALTH: &str = "/api/health";
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Request {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned {status}: {body}")]
    Status {
        path: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Thin client over the search backend. One GET per call; no retries and
/// no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn fetch_search_results(&self, q: &str) -> Result<SearchResponse, ClientError> {
        self.get_json(endpoints::SEARCH, &[("q", q.to_string())])
            .await
    }

    pub async fn fetch_analytics(&self) -> Result<Vec<AnalyticsEntry>, ClientError> {
        self.get_json(endpoints::ANALYTICS, &[]).await
    }

    pub async fn fetch_crawled_sites(
        &self,
        params: &CrawledSitesParams,
    ) -> Result<CrawledSitesPage, ClientError> {
        let mut query = Vec::with_capacity(3);
        if let Some(domain) = &params.domain {
            query.push(("domain", domain.clone()));
        }
        query.push(("limit", params.limit.to_string()));
        query.push(("offset", params.offset.to_string()));

        self.get_json(endpoints::CRAWLED_URLS, &query).await
    }

    /// Succeeds when the backend answers its health route with a 2xx status.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let path = endpoints::HEALTH;
        let response = self
            .client
            .get(self.config.endpoint(path))
            .send()
            .await
            .map_err(|source| ClientError::Request { path, source })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { path, status, body });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &'static str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        tracing::debug!(path, ?query, "fetching");

        let response = self
            .client
            .get(self.config.endpoint(path))
            .query(query)
            .send()
            .await
            .map_err(|source| {
                tracing::warn!(path, error = %source, "request failed");
                ClientError::Request { path, source }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Request { path, source })?;

        if !status.is_success() {
            tracing::warn!(path, %status, "backend returned an error status");
            return Err(ClientError::Status { path, status, body });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::warn!(path, error = %source, "undecodable response body");
            ClientError::Decode { path, source }
        })
    }
}
