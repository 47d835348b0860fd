//! Behavior tests for the watch-list manager.
//!
//! Quote freshness windows are zeroed throughout so every refresh cycle is
//! observable as network traffic, and the fallback seed table is emptied so
//! every ticker takes the fetch path.

use std::sync::Arc;
use std::time::Duration;

use marketdeck_core::{
    ClientConfig, FallbackSeeds, FreshnessPolicy, HttpClient, MarketDataClient, MemoryCache,
    MemoryStore, WatchlistManager,
};
use marketdeck_tests::{api_error, ok, quote_body, GatedHttpClient, RecordingHttpClient};

fn zero_windows() -> FreshnessPolicy {
    FreshnessPolicy {
        quote: Duration::ZERO,
        history: Duration::ZERO,
        symbol_insights: Duration::ZERO,
        market_insights: Duration::ZERO,
        market_overview: Duration::ZERO,
    }
}

fn manager_with<H: HttpClient + 'static>(http: Arc<H>, store: Arc<MemoryStore>) -> Arc<WatchlistManager> {
    let config = ClientConfig::new("http://backend.test").with_freshness(zero_windows());
    let client = Arc::new(
        MarketDataClient::new(http, Arc::new(MemoryCache::new()), config)
            .with_seeds(FallbackSeeds::empty()),
    );
    Arc::new(WatchlistManager::new(client, store))
}

#[tokio::test]
async fn add_is_idempotent_across_case_variants() {
    let http = Arc::new(RecordingHttpClient::new());
    http.add_route("/api/stock/TSLA", ok(quote_body("TSLA", 251.0)));
    let store = Arc::new(MemoryStore::new());
    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));

    assert!(manager.add("tsla").await.expect("first add succeeds"));
    assert!(!manager.add("TSLA").await.expect("second add is a no-op"));
    assert!(!manager.add("Tsla").await.expect("third add is a no-op"));

    assert_eq!(manager.len().await, 1);
    assert_eq!(store.snapshot(), vec!["TSLA"]);
}

#[tokio::test]
async fn lowercase_add_round_trips_uppercase_through_the_store() {
    let http = Arc::new(RecordingHttpClient::new());
    http.add_route("/api/stock/TSLA", ok(quote_body("TSLA", 251.0)));
    let store = Arc::new(MemoryStore::new());

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.add("tsla").await.expect("add succeeds");

    let reloaded = manager_with(Arc::clone(&http), Arc::clone(&store));
    reloaded.hydrate().await.expect("hydrate succeeds");

    let entries = reloaded.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].symbol.as_str(), "TSLA");
}

#[tokio::test]
async fn removed_ticker_never_resurrects_after_reload() {
    let http = Arc::new(RecordingHttpClient::new());
    http.add_route("/api/stock/", ok(quote_body("MSFT", 431.25)));
    let store = Arc::new(MemoryStore::seeded([
        String::from("AAPL"),
        String::from("MSFT"),
    ]));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.hydrate().await.expect("hydrate succeeds");
    assert!(manager.remove("aapl").await.expect("remove succeeds"));
    assert_eq!(store.snapshot(), vec!["MSFT"]);

    let reloaded = manager_with(Arc::clone(&http), Arc::clone(&store));
    reloaded.load().await.expect("load succeeds");

    let tickers: Vec<String> = reloaded
        .entries()
        .await
        .into_iter()
        .map(|entry| entry.symbol.as_str().to_owned())
        .collect();
    assert_eq!(tickers, vec!["MSFT"]);
}

#[tokio::test]
async fn load_isolates_per_symbol_failure() {
    let http = Arc::new(RecordingHttpClient::new());
    http.add_route("/api/stock/AAPL", api_error(429, "rate limited"));
    http.add_route("/api/stock/MSFT", ok(quote_body("MSFT", 431.25)));
    let store = Arc::new(MemoryStore::seeded([
        String::from("AAPL"),
        String::from("MSFT"),
    ]));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.load().await.expect("load succeeds");

    let entries = manager.entries().await;
    assert_eq!(entries.len(), 2);

    let aapl = entries.iter().find(|e| e.symbol.as_str() == "AAPL").expect("AAPL entry");
    assert!(aapl.quote.is_none());
    assert_eq!(aapl.error.as_deref(), Some("rate limited"));
    assert!(!aapl.loading);

    let msft = entries.iter().find(|e| e.symbol.as_str() == "MSFT").expect("MSFT entry");
    assert!(msft.error.is_none());
    assert_eq!(
        msft.quote.as_ref().expect("MSFT quote present").current_price,
        431.25
    );
}

#[tokio::test]
async fn refresh_failure_keeps_previous_quote_on_failing_entry() {
    let http = Arc::new(RecordingHttpClient::new());
    let store = Arc::new(MemoryStore::seeded([String::from("NVDA")]));

    // First cycle succeeds, second fails.
    http.enqueue(ok(quote_body("NVDA", 120.0)));
    http.enqueue(api_error(500, "upstream exploded"));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.load().await.expect("load succeeds");
    manager.refresh_all().await;

    let entries = manager.entries().await;
    let nvda = &entries[0];
    assert_eq!(nvda.error.as_deref(), Some("upstream exploded"));
    assert_eq!(
        nvda.quote.as_ref().expect("previous quote is kept").current_price,
        120.0
    );
}

#[tokio::test]
async fn overlapping_refresh_is_a_noop() {
    let inner = RecordingHttpClient::new();
    inner.add_route("/api/stock/AAPL", ok(quote_body("AAPL", 227.0)));
    inner.add_route("/api/stock/MSFT", ok(quote_body("MSFT", 431.25)));
    let http = Arc::new(GatedHttpClient::new(inner, 2));
    let store = Arc::new(MemoryStore::seeded([
        String::from("AAPL"),
        String::from("MSFT"),
    ]));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.hydrate().await.expect("hydrate succeeds");

    let background = Arc::clone(&manager);
    let first = tokio::spawn(async move { background.refresh_all().await });
    http.wait_for_arrivals(2).await;

    // Second cycle while the first is still in flight: must not fetch.
    manager.refresh_all().await;
    assert_eq!(http.inner.request_count(), 2);

    http.release(2);
    first.await.expect("first refresh completes");

    assert_eq!(http.inner.request_count(), 2);
    let entries = manager.entries().await;
    assert!(entries.iter().all(|entry| entry.quote.is_some()));
}

#[tokio::test]
async fn superseded_fetch_result_is_discarded() {
    let inner = RecordingHttpClient::new();
    // Arrival order: add()'s fetch first (gated), then the refresh cycle's.
    inner.enqueue(ok(quote_body("NVDA", 100.0)));
    inner.enqueue(ok(quote_body("NVDA", 200.0)));
    let http = Arc::new(GatedHttpClient::new(inner, 1));
    let store = Arc::new(MemoryStore::new());

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));

    let adding = Arc::clone(&manager);
    let add_task = tokio::spawn(async move { adding.add("NVDA").await });
    http.wait_for_arrivals(1).await;

    // A newer fetch generation resolves while the original is still gated.
    manager.refresh_all().await;
    let entries = manager.entries().await;
    assert_eq!(
        entries[0].quote.as_ref().expect("refresh applied").current_price,
        200.0
    );

    // The gated original resolves late and must be dropped, not applied.
    http.release(1);
    assert!(add_task
        .await
        .expect("add task completes")
        .expect("add succeeds"));

    let entries = manager.entries().await;
    assert_eq!(
        entries[0].quote.as_ref().expect("late result discarded").current_price,
        200.0
    );
    assert!(entries[0].error.is_none());
    assert_eq!(store.snapshot(), vec!["NVDA"]);
}

#[tokio::test]
async fn result_for_removed_symbol_is_dropped() {
    let inner = RecordingHttpClient::new();
    inner.add_route("/api/stock/NVDA", ok(quote_body("NVDA", 120.0)));
    let http = Arc::new(GatedHttpClient::new(inner, 1));
    let store = Arc::new(MemoryStore::seeded([String::from("NVDA")]));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.hydrate().await.expect("hydrate succeeds");

    let background = Arc::clone(&manager);
    let refresh = tokio::spawn(async move { background.refresh_all().await });
    http.wait_for_arrivals(1).await;

    assert!(manager.remove("NVDA").await.expect("remove succeeds"));
    http.release(1);
    refresh.await.expect("refresh completes");

    assert!(manager.entries().await.is_empty());
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn auto_refresh_ticks_until_guard_is_dropped() {
    let http = Arc::new(RecordingHttpClient::new());
    http.add_route("/api/stock/MSFT", ok(quote_body("MSFT", 431.25)));
    let store = Arc::new(MemoryStore::seeded([String::from("MSFT")]));

    let manager = manager_with(Arc::clone(&http), Arc::clone(&store));
    manager.hydrate().await.expect("hydrate succeeds");

    let guard = Arc::clone(&manager).start_auto_refresh(Duration::from_millis(25));
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(
        http.request_count() >= 2,
        "expected repeated refresh cycles, saw {}",
        http.request_count()
    );

    drop(guard);
    tokio::time::sleep(Duration::from_millis(20)).await;
    let settled = http.request_count();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(http.request_count(), settled, "timer must not leak past teardown");
}
