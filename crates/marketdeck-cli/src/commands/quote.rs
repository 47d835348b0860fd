use serde_json::Value;

use marketdeck_core::{Period, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext, args: &QuoteArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let period: Period = args.period.parse()?;

    let quote = context.client.quote(&symbol, period).await?;
    Ok(serde_json::to_value(quote)?)
}
