//! Tester configuration
//! Where the service lives and how politely to talk to it

use std::time::Duration;
use url::Url;

use crate::{Error, Result};

/// Pause between consecutive validation requests
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "SpamDetectionTester/1.0";

/// Configuration for a test run
#[derive(Debug, Clone)]
pub struct TesterConfig {
    /// Base URL of the spam detection service
    pub base_url: Url,
    /// Delay inserted between validation requests
    pub delay_ms: u64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Dump `/config` and `/blocked-ips` after the summary
    pub inspect: bool,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(crate::DEFAULT_BASE_URL).expect("default base URL parses"),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            inspect: false,
        }
    }
}

impl TesterConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration {
                message: format!("Unsupported URL scheme '{}'", url.scheme()),
            });
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_inspect(mut self, inspect: bool) -> Self {
        self.inspect = inspect;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash, used for display and path joining
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for an endpoint path such as `/health`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url_str(), path)
    }
}
