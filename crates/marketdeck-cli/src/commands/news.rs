use serde_json::Value;

use marketdeck_core::Symbol;

use crate::cli::NewsArgs;
use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext, args: &NewsArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let insight = context.client.symbol_insights(&symbol).await?;
    Ok(serde_json::to_value(insight)?)
}
