//! Watch-list management.
//!
//! Tracks the user's observed tickers, persists the ticker list through a
//! [`WatchlistStore`], and keeps quotes refreshed: explicitly via
//! [`WatchlistManager::refresh_all`] and periodically via
//! [`WatchlistManager::start_auto_refresh`].
//!
//! Fetches for different symbols are independent: one symbol's failure sets
//! only that entry's error. A result is applied only if the entry still
//! exists and no newer fetch for it has been issued since, so a slow
//! response can never overwrite a fresher one.

mod store;

pub use store::{JsonFileStore, MemoryStore, StoreError, WatchlistStore};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::client::MarketDataClient;
use crate::domain::{Period, Quote, Symbol};
use crate::error::{ClientError, ValidationError};

/// Default auto-refresh cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Errors surfaced by watch-list mutations.
///
/// Fetch failures never appear here; they land on the affected entry's
/// `error` field instead.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("watch list store error: {0}")]
    Store(#[from] StoreError),
}

/// One ticker under observation.
#[derive(Debug, Clone, Serialize)]
pub struct WatchedSymbol {
    pub symbol: Symbol,
    /// Last successfully fetched quote; kept through later failures.
    pub quote: Option<Quote>,
    pub loading: bool,
    pub error: Option<String>,
    /// Monotonic fetch generation; results from superseded fetches are
    /// discarded on arrival.
    #[serde(skip)]
    generation: u64,
}

impl WatchedSymbol {
    fn loading(symbol: Symbol) -> Self {
        Self {
            symbol,
            quote: None,
            loading: true,
            error: None,
            generation: 0,
        }
    }

    /// Mark a new fetch as issued and return its generation.
    fn issue_fetch(&mut self) -> u64 {
        self.loading = true;
        self.generation += 1;
        self.generation
    }
}

/// Maintains the watch list: membership, persistence, and refresh.
pub struct WatchlistManager {
    client: Arc<MarketDataClient>,
    store: Arc<dyn WatchlistStore>,
    entries: RwLock<Vec<WatchedSymbol>>,
    refreshing: AtomicBool,
    period: Period,
}

impl WatchlistManager {
    pub fn new(client: Arc<MarketDataClient>, store: Arc<dyn WatchlistStore>) -> Self {
        Self {
            client,
            store,
            entries: RwLock::new(Vec::new()),
            refreshing: AtomicBool::new(false),
            period: Period::default(),
        }
    }

    /// Range context requested alongside each quote.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Rebuild the entry list from the store without fetching anything.
    /// Unparseable persisted tickers are logged and skipped.
    pub async fn hydrate(&self) -> Result<(), WatchlistError> {
        let persisted = self.store.load().await?;

        let mut hydrated: Vec<WatchedSymbol> = Vec::with_capacity(persisted.len());
        for raw in persisted {
            match Symbol::parse(&raw) {
                Ok(symbol) if !hydrated.iter().any(|e| e.symbol == symbol) => {
                    hydrated.push(WatchedSymbol::loading(symbol));
                }
                Ok(symbol) => {
                    debug!(%symbol, "skipping duplicate persisted ticker");
                }
                Err(error) => {
                    warn!(ticker = %raw, %error, "skipping unparseable persisted ticker");
                }
            }
        }

        *self.entries.write().await = hydrated;
        Ok(())
    }

    /// Hydrate from the store and fetch every quote concurrently.
    pub async fn load(&self) -> Result<(), WatchlistError> {
        self.hydrate().await?;
        self.refresh_all().await;
        Ok(())
    }

    /// Add a ticker. Idempotent: returns `false` when it is already watched
    /// (in any case combination). A new entry is persisted before its first
    /// quote fetch resolves.
    pub async fn add(&self, raw: &str) -> Result<bool, WatchlistError> {
        let symbol = Symbol::parse(raw)?;

        let generation = {
            let mut entries = self.entries.write().await;
            if entries.iter().any(|e| e.symbol == symbol) {
                return Ok(false);
            }
            let mut entry = WatchedSymbol::loading(symbol.clone());
            let generation = entry.issue_fetch();
            entries.push(entry);
            generation
        };

        self.persist().await?;

        let result = self.client.quote(&symbol, self.period).await;
        self.apply(symbol, generation, result).await;
        Ok(true)
    }

    /// Remove a ticker by exact match. Returns whether an entry was removed.
    pub async fn remove(&self, raw: &str) -> Result<bool, WatchlistError> {
        let symbol = Symbol::parse(raw)?;

        let removed = {
            let mut entries = self.entries.write().await;
            let before = entries.len();
            entries.retain(|e| e.symbol != symbol);
            entries.len() != before
        };

        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Concurrently re-fetch every watched quote, applying each result as it
    /// resolves. A no-op when a refresh cycle is already in flight; the
    /// in-progress flag clears only once every fetch has settled.
    pub async fn refresh_all(&self) {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("refresh already in progress, skipping");
            return;
        }

        let issued: Vec<(Symbol, u64)> = {
            let mut entries = self.entries.write().await;
            entries
                .iter_mut()
                .map(|entry| (entry.symbol.clone(), entry.issue_fetch()))
                .collect()
        };

        let mut tasks = JoinSet::new();
        for (symbol, generation) in issued {
            let client = Arc::clone(&self.client);
            let period = self.period;
            tasks.spawn(async move {
                let result = client.quote(&symbol, period).await;
                (symbol, generation, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((symbol, generation, result)) => {
                    self.apply(symbol, generation, result).await;
                }
                Err(error) => warn!(%error, "watch list fetch task aborted"),
            }
        }

        self.refreshing.store(false, Ordering::SeqCst);
    }

    /// Snapshot of the current entries.
    pub async fn entries(&self) -> Vec<WatchedSymbol> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Spawn the fixed-interval refresh task. The returned guard aborts the
    /// task when dropped, so repeated start/teardown cycles cannot leak
    /// timers. Ticks while the list is empty do nothing; ticks during an
    /// in-flight refresh fall through to `refresh_all`'s no-op.
    pub fn start_auto_refresh(self: Arc<Self>, every: Duration) -> AutoRefresh {
        let manager = self;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick resolves immediately; consume it so the first
            // refresh happens one full interval after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if manager.is_empty().await {
                    continue;
                }
                debug!("auto-refresh tick");
                manager.refresh_all().await;
            }
        });

        AutoRefresh { handle }
    }

    async fn apply(&self, symbol: Symbol, generation: u64, result: Result<Quote, ClientError>) {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|e| e.symbol == symbol) else {
            debug!(%symbol, "dropping fetch result for removed symbol");
            return;
        };
        if entry.generation != generation {
            debug!(%symbol, "dropping superseded fetch result");
            return;
        }

        entry.loading = false;
        match result {
            Ok(quote) => {
                entry.quote = Some(quote);
                entry.error = None;
            }
            Err(error) => {
                entry.error = Some(error.to_string());
            }
        }
    }

    async fn persist(&self) -> Result<(), WatchlistError> {
        let tickers: Vec<String> = self
            .entries
            .read()
            .await
            .iter()
            .map(|e| e.symbol.as_str().to_owned())
            .collect();
        self.store.save(tickers).await?;
        Ok(())
    }
}

/// Handle to a running auto-refresh task.
pub struct AutoRefresh {
    handle: JoinHandle<()>,
}

impl AutoRefresh {
    /// Stop the task. Dropping the guard has the same effect.
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
