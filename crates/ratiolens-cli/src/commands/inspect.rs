use ratiolens_core::{AggregationPipeline, AggregationResult, TickerSymbol};

use crate::cli::InspectArgs;
use crate::error::CliError;

pub async fn run(
    args: &InspectArgs,
    pipeline: &AggregationPipeline,
) -> Result<AggregationResult, CliError> {
    let symbol = TickerSymbol::parse(&args.symbol)?;
    Ok(pipeline.run(std::slice::from_ref(&symbol)).await?)
}
