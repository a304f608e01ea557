use ratiolens_core::{parse_ticker_list, AggregationPipeline, AggregationResult};

use crate::cli::CompareArgs;
use crate::error::CliError;

pub async fn run(
    args: &CompareArgs,
    pipeline: &AggregationPipeline,
) -> Result<AggregationResult, CliError> {
    let tickers = parse_ticker_list(&args.symbols.join(" "))?;
    if tickers.is_empty() {
        return Err(CliError::Command(String::from(
            "no ticker symbols provided",
        )));
    }

    Ok(pipeline.run(&tickers).await?)
}
