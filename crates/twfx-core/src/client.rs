//! HTTP client for rate.bot.com.tw
//!
//! This module holds the single HTTP session used for every request. One
//! request is in flight per call and failures are returned straight away;
//! the only guard against a hung server is the per-request timeout.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tracing::{debug, warn};

use crate::error::{FxError, Result};

/// Base URL for the Bank of Taiwan rate site
pub const BOT_BASE_URL: &str = "https://rate.bot.com.tw";

/// Default User-Agent mimicking a desktop browser
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept-Language header for Traditional Chinese pages
const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-TW,zh;q=0.9,en;q=0.8";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host requests are sent to (default: [`BOT_BASE_URL`])
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BOT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with a different timeout.
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            ..Self::default()
        }
    }
}

/// HTTP client for the bank's rate pages
///
/// Wraps one `reqwest::Client`, so keep-alive connections are reused across
/// calls and dropped together with the `FxClient`.
pub struct FxClient {
    /// Underlying HTTP session
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl FxClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created or a zero
    /// timeout is requested
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(FxError::InvalidParameter(
                "timeout must be at least one second".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch HTML content from a path on the rate site
    ///
    /// # Arguments
    /// * `path` - Path with optional query string (e.g., "/xrt?Lang=zh-TW")
    ///
    /// # Errors
    /// - `FxError::HttpError` - connection failure, timeout or unreadable body
    /// - `FxError::Status` - any non-2xx response
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(FxError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "response received");
        Ok(body)
    }

    /// Absolute URL for a site path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
