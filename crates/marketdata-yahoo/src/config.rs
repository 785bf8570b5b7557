//! Configuration for the Yahoo! Finance source.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Yahoo Finance chart API base URL.
pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance search (autocomplete) API URL.
pub const DEFAULT_SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// User agent for HTTP requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Settings for [`YahooSource`](crate::YahooSource).
///
/// Every field has a default, so a partial TOML/JSON document deserializes
/// into a usable configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    /// Base URL of the chart API; the symbol is appended as a path segment.
    pub chart_url: String,
    /// URL of the search API.
    pub search_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout in milliseconds; must be non-zero.
    pub timeout_ms: u64,
    /// Minimum delay between two requests in milliseconds.
    pub rate_limit_ms: u64,
    /// Symbol requested by the connectivity probe.
    pub probe_symbol: String,
    /// Maximum number of suggestions requested per search.
    pub suggestion_count: u32,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            chart_url: DEFAULT_CHART_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 30_000,
            rate_limit_ms: 1000,
            probe_symbol: "^GSPC".to_string(),
            suggestion_count: 20,
        }
    }
}

impl YahooConfig {
    /// Points both APIs at another host, keeping the Yahoo paths.
    ///
    /// Handy for proxies and mock servers.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.chart_url = format!("{base}/v8/finance/chart");
        self.search_url = format!("{base}/v1/finance/search");
        self
    }

    /// Sets the minimum delay between requests.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit_ms = u64::try_from(rate_limit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the per-request timeout, kept to millisecond precision.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
