use serde_json::Value;

use crate::cli::MarketCommand;
use crate::error::CliError;

use super::AppContext;

pub async fn run(context: &AppContext, command: &MarketCommand) -> Result<Value, CliError> {
    match command {
        MarketCommand::Overview => {
            let overview = context.client.market_overview().await?;
            Ok(serde_json::to_value(overview)?)
        }
        MarketCommand::Insights(args) => {
            let insight = context.client.market_insights(args.days_back).await?;
            Ok(serde_json::to_value(insight)?)
        }
    }
}
