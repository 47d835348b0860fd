mod history;
mod market;
mod news;
mod quote;
mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use marketdeck_core::{
    ClientConfig, JsonFileCache, JsonFileStore, MarketDataClient, MemoryCache, ReqwestHttpClient,
    ResponseCache, WatchlistManager,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Shared wiring for every command: one client, one watch-list path.
pub struct AppContext {
    pub client: Arc<MarketDataClient>,
    watchlist_path: PathBuf,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Self {
        let config = match &cli.base_url {
            Some(url) => ClientConfig::new(url),
            None => ClientConfig::from_env(),
        };

        let cache: Arc<dyn ResponseCache> = if cli.no_cache {
            Arc::new(MemoryCache::new())
        } else {
            Arc::new(JsonFileCache::new(&cli.cache_dir))
        };

        let client = Arc::new(MarketDataClient::new(
            Arc::new(ReqwestHttpClient::new()),
            cache,
            config,
        ));

        Self {
            client,
            watchlist_path: cli.watchlist.clone(),
        }
    }

    pub fn watchlist_manager(&self) -> Arc<WatchlistManager> {
        Arc::new(WatchlistManager::new(
            Arc::clone(&self.client),
            Arc::new(JsonFileStore::new(&self.watchlist_path)),
        ))
    }
}

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let context = AppContext::from_cli(cli);

    match &cli.command {
        Command::Quote(args) => quote::run(&context, args).await,
        Command::History(args) => history::run(&context, args).await,
        Command::News(args) => news::run(&context, args).await,
        Command::Market(command) => market::run(&context, command).await,
        Command::Watch(command) => watch::run(&context, command).await,
    }
}
