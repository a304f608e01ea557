use std::io::{self, Write};

use ratiolens_core::{
    AggregationResult, DerivedRow, ProgressObserver, ProgressUpdate, Report, UnitScale,
};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    report: &Report<AggregationResult>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(report)?;
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &Report<AggregationResult>) {
    println!("request_id  : {}", report.meta.request_id);
    println!("generated_at: {}", report.meta.generated_at);
    println!("source      : {}", report.meta.source);
    println!("latency_ms  : {}", report.meta.latency_ms);
    println!();

    let result = &report.data;
    if result.rows.is_empty() {
        println!("(no rows)");
    } else {
        print_rows(&result.rows);
        println!();
        println!("* ROIC% approximated from operating margin, not invested capital");
    }

    if !result.failed.is_empty() {
        println!();
        println!("failed tickers:");
        for failed in &result.failed {
            println!("  - {}", failed.warning());
        }
    }

    let summary = result.summary();
    if !summary.is_empty() {
        println!();
        println!("summary (min / mean / max over non-null values):");
        for entry in &summary {
            println!(
                "  {:<9} {:>12.2} / {:>12.2} / {:>12.2}  (n={})",
                entry.metric, entry.min, entry.mean, entry.max, entry.count
            );
        }
    }

    if !report.meta.warnings.is_empty() {
        println!();
        println!("warnings:");
        for warning in &report.meta.warnings {
            println!("  - {warning}");
        }
    }
}

fn print_rows(rows: &[DerivedRow]) {
    let unit = rows[0].equity_unit;
    let equity_header = format!("EQUITY({})", unit.as_str());
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(4);
    let symbol_width = rows
        .iter()
        .map(|row| row.symbol.as_str().len())
        .chain(std::iter::once("SYMBOL".len()))
        .max()
        .unwrap_or(6);

    println!(
        "{:<symbol_width$}  {:<name_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>16}",
        "SYMBOL", "NAME", "PER", "PBR", "ROE%", "ROA%", "ROIC%*", equity_header,
    );
    for row in rows {
        println!(
            "{:<symbol_width$}  {:<name_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>16}",
            row.symbol.as_str(),
            row.name,
            fmt_ratio(row.per),
            fmt_ratio(row.pbr),
            fmt_ratio(row.roe_pct),
            fmt_ratio(row.roa_pct),
            fmt_ratio(row.roic_pct),
            fmt_equity(row.equity, unit),
        );
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => String::from("-"),
    }
}

fn fmt_equity(value: Option<f64>, unit: UnitScale) -> String {
    match value {
        Some(value) if unit == UnitScale::Millions => format!("{value:.0}"),
        Some(value) => format!("{value:.2}"),
        None => String::from("-"),
    }
}

/// Carriage-return progress line on stderr; stdout stays machine-readable.
#[derive(Debug, Default)]
pub struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        eprint!("\rfetched {}/{}", update.completed, update.total);
        let _ = io::stderr().flush();
        if update.completed == update.total {
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_render_with_two_decimals_or_dash() {
        assert_eq!(fmt_ratio(Some(15.0)), "15.00");
        assert_eq!(fmt_ratio(None), "-");
    }

    #[test]
    fn millions_equity_renders_whole() {
        assert_eq!(fmt_equity(Some(5000.0), UnitScale::Millions), "5000");
        assert_eq!(fmt_equity(Some(50.0), UnitScale::HundredMillions), "50.00");
    }
}
