//! # Service Configuration
//!
//! Where the upstream adoption service lives and how requests are shaped.
//! Defaults target the public service; environment variables override them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the upstream adoption service
pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Number of candidate ids requested by the initial search
pub const DEFAULT_PAGE_SIZE: usize = 100;

pub const ENV_BASE_URL: &str = "PAWMATCH_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "PAWMATCH_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "PAWMATCH_TIMEOUT_SECS";

/// Connection settings for the adoption service client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service root, without a trailing slash
    pub base_url: String,
    /// Ids requested per search
    pub page_size: usize,
    /// Per-request timeout. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Create a config pointing at `base_url` with default request shaping
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Load defaults, then apply `PAWMATCH_*` environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }

        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            config.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", ENV_PAGE_SIZE, size))?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", ENV_TIMEOUT_SECS, secs))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the base URL, dropping any trailing slash
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Absolute URL for a service path such as `/dogs/search`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
