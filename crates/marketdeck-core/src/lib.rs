//! # Marketdeck Core
//!
//! Data layer for a market dashboard: a typed client over the backend HTTP
//! API with per-endpoint TTL caching, static fallback quotes, and a
//! persisted watch list with concurrent refresh.
//!
//! ## Overview
//!
//! - **Typed accessors** for quotes, historical series, market index
//!   snapshots, and AI news sentiment
//! - **TTL cache** with per-endpoint freshness windows behind an injectable
//!   [`ResponseCache`] (in-memory or JSON files on disk)
//! - **Fallback seeds**: a configurable allow-list of tickers answered from
//!   static data with no network call
//! - **Watch list** with durable ticker persistence, isolated per-symbol
//!   refresh, and a fixed-interval auto-refresh task
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Response cache trait and backends |
//! | [`client`] | The [`MarketDataClient`] accessors |
//! | [`config`] | Base URL, timeout, freshness windows |
//! | [`domain`] | Payload types (quotes, series, insights) |
//! | [`error`] | Error taxonomy |
//! | [`fallback`] | Static fallback seed table |
//! | [`http`] | Transport abstraction over reqwest |
//! | [`watchlist`] | Watch-list manager and stores |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marketdeck_core::{
//!     ClientConfig, JsonFileCache, MarketDataClient, Period, ReqwestHttpClient, Symbol,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketDataClient::new(
//!         Arc::new(ReqwestHttpClient::new()),
//!         Arc::new(JsonFileCache::new(".marketdeck/cache")),
//!         ClientConfig::from_env(),
//!     );
//!
//!     let symbol = Symbol::parse("MSFT")?;
//!     let quote = client.quote(&symbol, Period::OneYear).await?;
//!     println!("{}: ${:.2}", quote.symbol, quote.current_price);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures propagate to the caller as [`ClientError`]; nothing in
//! this layer retries. Cache read/write problems are soft failures that
//! degrade to a miss and are logged, never surfaced.

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod http;
pub mod watchlist;

// Re-export commonly used types at crate root for convenience

pub use cache::{CachedEntry, JsonFileCache, MemoryCache, ResponseCache};
pub use client::MarketDataClient;
pub use config::{ClientConfig, FreshnessPolicy, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use domain::{
    HistoricalSeries, ImpactTier, IndexLevels, IndexSnapshot, MarketInsight, MarketOverview,
    NewsArticle, NewsInsight, Period, PricePoint, Quote, ScheduledEvent, Sentiment, Symbol,
    TrendingStock, UtcDateTime,
};
pub use error::{ClientError, ValidationError};
pub use fallback::FallbackSeeds;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use watchlist::{
    AutoRefresh, JsonFileStore, MemoryStore, StoreError, WatchedSymbol, WatchlistError,
    WatchlistManager, WatchlistStore, DEFAULT_REFRESH_INTERVAL,
};
