use serde_json::Value;

use marketdeck_core::{Period, Symbol};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext, args: &HistoryArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let period: Period = args.period.parse()?;

    let series = context.client.history(&symbol, period).await?;
    Ok(serde_json::to_value(series)?)
}
