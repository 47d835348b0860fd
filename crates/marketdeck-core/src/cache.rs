//! Response caching.
//!
//! The client caches raw JSON bodies keyed by a normalized endpoint key and
//! decides freshness itself, because each endpoint carries its own window
//! (see [`crate::FreshnessPolicy`]). The cache backend is injected through
//! [`ResponseCache`]: [`MemoryCache`] for tests and ephemeral use,
//! [`JsonFileCache`] for a durable store that survives restarts.
//!
//! Cache failures are soft by contract: a backend that cannot read or write
//! degrades to a miss, never to a caller-visible error.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A cached response body plus the instant it was stored.
///
/// Entries are superseded whole; nothing is ever merged into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub body: String,
    pub stored_at: SystemTime,
}

impl CachedEntry {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            stored_at: SystemTime::now(),
        }
    }

    /// Age relative to `now`. A timestamp in the future reads as zero age
    /// rather than as stale.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.stored_at).unwrap_or(Duration::ZERO)
    }

    pub fn is_fresh(&self, window: Duration, now: SystemTime) -> bool {
        self.age(now) < window
    }
}

/// Injected cache backend contract.
pub trait ResponseCache: Send + Sync {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<CachedEntry>> + Send + 'a>>;

    /// Store `body` under `key`, replacing any prior entry.
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: String,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

    fn evict<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// In-memory cache backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<tokio::sync::RwLock<HashMap<String, CachedEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

impl ResponseCache for MemoryCache {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<CachedEntry>> + Send + 'a>> {
        Box::pin(async move { self.inner.read().await.get(key).cloned() })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: String,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.inner
                .write()
                .await
                .insert(key.to_owned(), CachedEntry::new(body));
        })
    }

    fn evict<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.inner.write().await.remove(key);
        })
    }
}

/// On-disk persisted form: the raw response body plus a unix timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedEntry {
    data: String,
    timestamp: u64,
}

/// File-backed cache: one `{ data, timestamp }` JSON document per key.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// first write; a directory that cannot be created just disables writes.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for_key(key))
    }

    fn read_entry(&self, key: &str) -> Option<CachedEntry> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key, %error, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<PersistedEntry>(&raw) {
            Ok(entry) => Some(CachedEntry {
                body: entry.data,
                stored_at: UNIX_EPOCH + Duration::from_secs(entry.timestamp),
            }),
            Err(error) => {
                warn!(key, %error, "discarding corrupt cache file");
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    fn write_entry(&self, key: &str, body: String) {
        if let Err(error) = std::fs::create_dir_all(&self.dir) {
            warn!(key, %error, "cache directory unavailable, skipping write");
            return;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let entry = PersistedEntry {
            data: body,
            timestamp,
        };

        let serialized = match serde_json::to_string(&entry) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(key, %error, "cache entry serialization failed, skipping write");
                return;
            }
        };

        if let Err(error) = std::fs::write(self.entry_path(key), serialized) {
            warn!(key, %error, "cache write failed, skipping");
        }
    }

    fn remove_entry(&self, key: &str) {
        let path = self.entry_path(key);
        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }
}

impl ResponseCache for JsonFileCache {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<CachedEntry>> + Send + 'a>> {
        Box::pin(async move { self.read_entry(key) })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: String,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move { self.write_entry(key, body) })
    }

    fn evict<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move { self.remove_entry(key) })
    }
}

/// Map a cache key to a filesystem-safe name.
///
/// The sanitized prefix keeps files inspectable; the folded-byte suffix keeps
/// distinct keys from colliding after sanitization (`stock:A` vs `stock-A`).
fn file_name_for_key(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect();
    format!("{sanitized}-{:08x}.json", key_seed(key))
}

fn key_seed(key: &str) -> u32 {
    key.bytes().fold(11_u32, |acc, byte| {
        acc.wrapping_mul(31).wrapping_add(byte as u32)
    })
}
