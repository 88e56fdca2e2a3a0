//! Client configuration with env-driven defaults.
//!
//! Environment variables:
//! - `AWSOME_BASE_URL` (default `http://localhost:7860`)
//! - `AWSOME_API_TOKEN`
//! - `AWSOME_HTTP_TIMEOUT_SECS` (default 30)
//! - `AWSOME_HTTP_POOL_MAX_IDLE_PER_HOST` (default 32)
//! - `AWSOME_HTTP_POOL_IDLE_TIMEOUT_SECS` (default 90)
//!
//! Values set explicitly on [`ClientBuilder`] take precedence.

use crate::conversations::ConversationsApi;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:7860";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with whatever the environment sets.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("AWSOME_BASE_URL").unwrap_or(defaults.base_url),
            api_token: env::var("AWSOME_API_TOKEN").ok().filter(|s| !s.is_empty()),
            timeout: env_parse::<u64>("AWSOME_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: env_parse::<usize>("AWSOME_HTTP_POOL_MAX_IDLE_PER_HOST")
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: env_parse::<u64>("AWSOME_HTTP_POOL_IDLE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.pool_idle_timeout),
            default_headers: defaults.default_headers,
        }
    }

    /// Check the base URL is absolute http(s).
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base url: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(self.base_url.clone())
                    .with_source("client_config"),
            )
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::configuration_with_context(
                format!("unsupported url scheme: {}", other),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_source("client_config"),
            )),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

/// Builder for [`ConversationsApi`] over the bundled HTTP transport.
pub struct ClientBuilder {
    base_url: Option<String>,
    api_token: Option<String>,
    timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    default_headers: HashMap<String, String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout: None,
            pool_max_idle_per_host: None,
            pool_idle_timeout: None,
            default_headers: HashMap::new(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.pool_max_idle_per_host = Some(n);
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Header sent with every request. Per-call `headers` overrides win.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Resolve the final configuration: explicit values, then env, then defaults.
    pub fn config(self) -> ClientConfig {
        let env_cfg = ClientConfig::from_env();
        let mut default_headers = env_cfg.default_headers;
        default_headers.extend(self.default_headers);
        ClientConfig {
            base_url: self.base_url.unwrap_or(env_cfg.base_url),
            api_token: self.api_token.or(env_cfg.api_token),
            timeout: self.timeout.unwrap_or(env_cfg.timeout),
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .unwrap_or(env_cfg.pool_max_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(env_cfg.pool_idle_timeout),
            default_headers,
        }
    }

    pub fn build(self) -> Result<ConversationsApi<HttpTransport>> {
        let config = self.config();
        config.validate()?;
        Ok(ConversationsApi::new(HttpTransport::new(&config)?))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
