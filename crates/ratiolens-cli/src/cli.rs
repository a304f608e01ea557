//! CLI argument definitions for ratiolens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `compare` | Aggregate ratios for a list of tickers |
//! | `inspect` | Single-ticker drill-down |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors (exit code 5) |
//! | `--mock` | `false` | Serve deterministic offline data |
//! | `--unit` | `hundred-millions` | Equity display unit |
//! | `--missing` | `zero-default` | Missing-field policy |
//! | `--concurrency` | `4` | Max concurrent fetches |
//! | `--delay-ms` | none | Fixed pause before each fetch |
//! | `--max-rpm` | none | Provider calls-per-minute cap |
//! | `--labels` | none | JSON file of symbol → display label |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ratiolens_core::{MissingFieldPolicy, UnitScale};

/// Ticker ratio comparison CLI.
///
/// Fetches per-ticker fundamentals from Yahoo Finance, derives PER/PBR/ROE/
/// ROA and an approximate ROIC, and renders a comparison table. ROIC is a
/// margin-based proxy, not an invested-capital figure.
#[derive(Debug, Parser)]
#[command(
    name = "ratiolens",
    author,
    version,
    about = "Compare equity ratios across tickers"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Serve deterministic offline data instead of calling the provider.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Equity display unit (raw, millions, hundred-millions, trillions).
    #[arg(long, global = true, default_value = "hundred-millions")]
    pub unit: UnitScale,

    /// Missing-field policy (zero-default, null-propagate).
    #[arg(long, global = true, default_value = "zero-default")]
    pub missing: MissingFieldPolicy,

    /// Maximum number of concurrent provider fetches.
    #[arg(long, global = true, default_value_t = 4)]
    pub concurrency: usize,

    /// Fixed pause in milliseconds before each provider call.
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Provider calls-per-minute cap.
    #[arg(long, global = true)]
    pub max_rpm: Option<u32>,

    /// JSON file mapping symbols to display labels.
    #[arg(long, global = true)]
    pub labels: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table for terminal display.
    Table,
    /// Single JSON report.
    Json,
    /// Newline-delimited JSON (one report per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📊 Aggregate ratios for one or more tickers.
    ///
    /// Symbols may be comma or whitespace separated; exchange suffixes are
    /// supported (e.g. 9984.T).
    ///
    /// # Examples
    ///
    ///   ratiolens compare 9984.T 7203.T 8058.T
    ///   ratiolens compare AAPL,MSFT --unit millions --format json
    Compare(CompareArgs),

    /// 🔍 Drill into a single ticker.
    ///
    /// # Examples
    ///
    ///   ratiolens inspect 9984.T
    ///   ratiolens inspect AAPL --unit millions
    Inspect(InspectArgs),
}

/// Arguments for the `compare` command.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Ticker symbols (comma or whitespace separated).
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

/// Arguments for the `inspect` command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Ticker symbol to inspect.
    pub symbol: String,
}
