//! The market data client.
//!
//! Single point of contact between the dashboard and the backend API. Every
//! accessor runs the same cache-or-fetch sequence:
//!
//! 1. seeds first: a ticker in the fallback table short-circuits entirely;
//! 2. a cached body younger than the endpoint's freshness window is decoded
//!    and returned without network activity;
//! 3. otherwise the stale entry is evicted, exactly one fetch runs, and a
//!    successful body replaces the entry before being returned.
//!
//! A failed fetch propagates; the evicted stale entry is never served in its
//! place. There is no retry at this layer.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::domain::{
    HistoricalSeries, IndexLevels, MarketInsight, MarketOverview, NewsInsight, Period, Quote,
    Symbol,
};
use crate::error::{ClientError, ValidationError};
use crate::fallback::FallbackSeeds;
use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// Typed accessor layer over the backend HTTP API.
pub struct MarketDataClient {
    http: Arc<dyn HttpClient>,
    cache: Arc<dyn ResponseCache>,
    config: ClientConfig,
    seeds: FallbackSeeds,
}

impl MarketDataClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        cache: Arc<dyn ResponseCache>,
        config: ClientConfig,
    ) -> Self {
        Self {
            http,
            cache,
            config,
            seeds: FallbackSeeds::default(),
        }
    }

    /// Replace the fallback seed table.
    pub fn with_seeds(mut self, seeds: FallbackSeeds) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current quote for `symbol`. `period` only selects the range context
    /// the backend bundles with the quote; it does not change the price.
    pub async fn quote(&self, symbol: &Symbol, period: Period) -> Result<Quote, ClientError> {
        if let Some(seed) = self.seeds.get(symbol) {
            debug!(%symbol, "serving seeded fallback quote");
            return Ok(seed.clone());
        }

        let key = format!("stock:{symbol}:{period}");
        let url = format!(
            "{}/api/stock/{}?period={}",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
            period.as_str(),
        );
        self.cached_fetch(&key, &url, self.config.freshness.quote)
            .await
    }

    /// Historical price series for `(symbol, period)`.
    pub async fn history(
        &self,
        symbol: &Symbol,
        period: Period,
    ) -> Result<HistoricalSeries, ClientError> {
        let key = format!("history:{symbol}:{period}");
        let url = format!(
            "{}/api/stock/{}/history?period={}",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
            period.as_str(),
        );
        self.cached_fetch(&key, &url, self.config.freshness.history)
            .await
    }

    /// AI news sentiment for one symbol.
    pub async fn symbol_insights(&self, symbol: &Symbol) -> Result<NewsInsight, ClientError> {
        let key = format!("news:{symbol}");
        let url = format!(
            "{}/api/news/{}",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
        );
        self.cached_fetch(&key, &url, self.config.freshness.symbol_insights)
            .await
    }

    /// Market-wide AI news sentiment over the trailing `days_back` days.
    /// Distinct look-back windows cache independently.
    pub async fn market_insights(&self, days_back: u32) -> Result<MarketInsight, ClientError> {
        if days_back == 0 {
            return Err(ValidationError::InvalidLookback.into());
        }

        let key = format!("market:insights:{days_back}");
        let url = format!(
            "{}/api/market/insights?days_back={days_back}",
            self.config.base_url,
        );
        self.cached_fetch(&key, &url, self.config.freshness.market_insights)
            .await
    }

    /// Market index snapshot, shaped from the backend's code-keyed map.
    pub async fn market_overview(&self) -> Result<MarketOverview, ClientError> {
        let key = "market:overview";
        let url = format!("{}/api/market/overview", self.config.base_url);
        let map: BTreeMap<String, IndexLevels> = self
            .cached_fetch(key, &url, self.config.freshness.market_overview)
            .await?;
        Ok(MarketOverview::from_code_map(map))
    }

    async fn cached_fetch<T: DeserializeOwned>(
        &self,
        key: &str,
        url: &str,
        window: Duration,
    ) -> Result<T, ClientError> {
        if let Some(entry) = self.cache.get(key).await {
            if entry.is_fresh(window, SystemTime::now()) {
                match serde_json::from_str(&entry.body) {
                    Ok(value) => {
                        debug!(key, "cache hit");
                        return Ok(value);
                    }
                    Err(error) => {
                        // Soft failure: a corrupt entry degrades to a miss.
                        warn!(key, %error, "discarding undecodable cache entry");
                        self.cache.evict(key).await;
                    }
                }
            } else {
                debug!(key, "cache entry stale, evicting");
                self.cache.evict(key).await;
            }
        }

        let body = self.fetch(url).await?;
        let value =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.cache.put(key, body).await;
        Ok(value)
    }

    async fn fetch(&self, url: &str) -> Result<String, ClientError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                message: error_message(&response),
            });
        }

        Ok(response.body)
    }
}

/// Surface the server's `error` field when the body carries one, otherwise a
/// generic status-coded message.
fn error_message(response: &HttpResponse) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) if !body.error.trim().is_empty() => body.error,
        _ => format!("HTTP {}", response.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_server_field() {
        let response = HttpResponse::with_status(429, r#"{"error": "rate limited"}"#);
        assert_eq!(error_message(&response), "rate limited");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let response = HttpResponse::with_status(502, "<html>bad gateway</html>");
        assert_eq!(error_message(&response), "HTTP 502");
    }

    #[test]
    fn error_message_ignores_blank_error_field() {
        let response = HttpResponse::with_status(500, r#"{"error": "  "}"#);
        assert_eq!(error_message(&response), "HTTP 500");
    }
}
