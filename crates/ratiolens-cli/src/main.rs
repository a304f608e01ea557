mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let outcome = commands::run(&cli).await?;
    let report = outcome.into_report()?;
    output::render(&report, cli.format, cli.pretty)?;

    if cli.strict && !report.meta.warnings.is_empty() {
        return Err(CliError::StrictModeViolation {
            warning_count: report.meta.warnings.len(),
        });
    }

    if report.data.is_empty_outcome() {
        eprintln!("error: no valid ticker data for any requested symbol");
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
