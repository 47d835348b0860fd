//! CLI argument definitions.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch the current quote for a symbol |
//! | `history` | Fetch a historical price series |
//! | `news` | Fetch AI news sentiment for a symbol |
//! | `market overview` | Fetch market index levels |
//! | `market insights` | Fetch market-wide AI news sentiment |
//! | `watch` | Manage the persisted watch list |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Market dashboard data client.
///
/// Fetches quotes, historical series, and AI news sentiment from the
/// dashboard backend, with per-endpoint response caching and a persisted
/// watch list.
#[derive(Debug, Parser)]
#[command(name = "marketdeck", version, about = "Market dashboard data client")]
pub struct Cli {
    /// Backend base URL. Falls back to MARKETDECK_API_BASE_URL, then to the
    /// local development address.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Directory for the durable response cache.
    #[arg(long, global = true, default_value = ".marketdeck/cache")]
    pub cache_dir: PathBuf,

    /// Disable the durable response cache for this invocation.
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    /// Path of the persisted watch list.
    #[arg(long, global = true, default_value = ".marketdeck/watchlist.json")]
    pub watchlist: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current quote for a symbol.
    Quote(QuoteArgs),
    /// Fetch a historical price series.
    History(HistoryArgs),
    /// Fetch AI news sentiment for a symbol.
    News(NewsArgs),
    /// Market-wide data.
    #[command(subcommand)]
    Market(MarketCommand),
    /// Manage the persisted watch list.
    #[command(subcommand)]
    Watch(WatchCommand),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker symbol (case-insensitive).
    pub symbol: String,

    /// Range context bundled with the quote: 1d, 1w, 3mo, or 1y.
    #[arg(long, default_value = "1y")]
    pub period: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Ticker symbol (case-insensitive).
    pub symbol: String,

    /// Series period: 1d, 1w, 3mo, or 1y.
    #[arg(long)]
    pub period: String,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Ticker symbol (case-insensitive).
    pub symbol: String,
}

#[derive(Debug, Subcommand)]
pub enum MarketCommand {
    /// Fetch current market index levels.
    Overview,
    /// Fetch market-wide AI news sentiment.
    Insights(InsightsArgs),
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    /// Look-back window in days.
    #[arg(long, default_value_t = 7)]
    pub days_back: u32,
}

#[derive(Debug, Subcommand)]
pub enum WatchCommand {
    /// Add symbols to the watch list and fetch their quotes.
    Add {
        /// Ticker symbols (case-insensitive).
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Remove symbols from the watch list.
    Remove {
        /// Ticker symbols (case-insensitive).
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// List the persisted tickers without fetching quotes.
    List,
    /// Re-fetch every watched symbol's quote.
    Refresh,
}
