use serde_json::{json, Value};

use crate::cli::WatchCommand;
use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext, command: &WatchCommand) -> Result<Value, CliError> {
    let manager = context.watchlist_manager();
    manager.hydrate().await?;

    match command {
        WatchCommand::Add { symbols } => {
            let mut added = Vec::new();
            let mut already_watched = Vec::new();
            for raw in symbols {
                if manager.add(raw).await? {
                    added.push(raw.to_ascii_uppercase());
                } else {
                    already_watched.push(raw.to_ascii_uppercase());
                }
            }
            Ok(json!({
                "added": added,
                "already_watched": already_watched,
                "entries": serde_json::to_value(manager.entries().await)?,
            }))
        }
        WatchCommand::Remove { symbols } => {
            let mut removed = Vec::new();
            let mut not_watched = Vec::new();
            for raw in symbols {
                if manager.remove(raw).await? {
                    removed.push(raw.to_ascii_uppercase());
                } else {
                    not_watched.push(raw.to_ascii_uppercase());
                }
            }
            Ok(json!({
                "removed": removed,
                "not_watched": not_watched,
                "tickers": tickers(&manager).await,
            }))
        }
        WatchCommand::List => Ok(json!({ "tickers": tickers(&manager).await })),
        WatchCommand::Refresh => {
            manager.refresh_all().await;
            Ok(json!({
                "entries": serde_json::to_value(manager.entries().await)?,
            }))
        }
    }
}

async fn tickers(manager: &marketdeck_core::WatchlistManager) -> Vec<String> {
    manager
        .entries()
        .await
        .into_iter()
        .map(|entry| entry.symbol.as_str().to_owned())
        .collect()
}
