//! Watch-list persistence.
//!
//! Only the ticker strings are durable; quotes are transient and re-derived
//! on load. The store is injected behind a trait so tests run against an
//! in-memory implementation.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Mutex;

use thiserror::Error;

/// Persistence failures for the watch list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("watch list is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable store for the ticker list.
pub trait WatchlistStore: Send + Sync {
    /// Read the persisted tickers. A store that has never been written
    /// returns an empty list, not an error.
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, StoreError>> + Send + 'a>>;

    /// Replace the persisted tickers wholesale.
    fn save<'a>(
        &'a self,
        tickers: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;
}

/// File-backed store: one JSON array of uppercase tickers.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Vec<String>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&self, tickers: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string(tickers)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl WatchlistStore for JsonFileStore {
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, StoreError>> + Send + 'a>> {
        Box::pin(async move { self.read() })
    }

    fn save<'a>(
        &'a self,
        tickers: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(async move { self.write(&tickers) })
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tickers: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, as if a previous session had saved.
    pub fn seeded(tickers: impl IntoIterator<Item = String>) -> Self {
        Self {
            tickers: Mutex::new(tickers.into_iter().collect()),
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.tickers
            .lock()
            .expect("watch list store lock should not be poisoned")
            .clone()
    }
}

impl WatchlistStore for MemoryStore {
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, StoreError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.snapshot()) })
    }

    fn save<'a>(
        &'a self,
        tickers: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(async move {
            *self
                .tickers
                .lock()
                .expect("watch list store lock should not be poisoned") = tickers;
            Ok(())
        })
    }
}
