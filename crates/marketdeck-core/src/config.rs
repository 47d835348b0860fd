//! Client configuration.

use std::time::Duration;

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "MARKETDECK_API_BASE_URL";

/// Local development backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Per-endpoint cache freshness windows.
///
/// Windows track each data type's real-world volatility: quotes move in
/// minutes, historical series for closed periods barely move at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub quote: Duration,
    pub history: Duration,
    pub symbol_insights: Duration,
    pub market_insights: Duration,
    pub market_overview: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            quote: Duration::from_secs(120),
            history: Duration::from_secs(1_800),
            symbol_insights: Duration::from_secs(900),
            market_insights: Duration::from_secs(600),
            market_overview: Duration::from_secs(120),
        }
    }
}

/// Configuration for [`crate::MarketDataClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Transport timeout budget per request, in milliseconds.
    pub timeout_ms: u64,
    pub freshness: FreshnessPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout_ms: 10_000,
            freshness: FreshnessPolicy::default(),
        }
    }

    /// Read the base URL from `MARKETDECK_API_BASE_URL`, falling back to the
    /// local development address.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));
        Self::new(base_url)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(raw: String) -> String {
    raw.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn default_windows_rank_by_volatility() {
        let policy = FreshnessPolicy::default();
        assert!(policy.quote < policy.market_insights);
        assert!(policy.market_insights < policy.history);
        assert!(policy.symbol_insights < policy.history);
    }
}
