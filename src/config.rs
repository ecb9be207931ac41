use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_base_url: get_env_or_default("API_BASE_URL", "http://localhost:3000"),
        api_timeout_ms: env::var("API_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok()),
        bind_addr: get_env_or_default("BIND_ADDR", "127.0.0.1:5173"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_timeout_ms: Option<u64>,
    pub bind_addr: String,
    pub static_dir: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Connection settings handed to [`crate::client::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        Ok(Self { base_url, timeout })
    }

    /// Resolve an API path such as `/api/search` against the base URL.
    ///
    /// A base URL with a path prefix (`https://host/mini/`) keeps that prefix.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
        url.set_query(None);
        url
    }
}
