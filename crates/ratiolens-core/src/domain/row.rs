use serde::{Deserialize, Serialize};

use crate::{TickerSymbol, UnitScale};

/// One derived output record per successfully processed ticker.
///
/// `roic_pct` is the margin-based approximation (operating margin × 0.7),
/// not a balance-sheet ROIC; see the calculator docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub symbol: TickerSymbol,
    pub name: String,
    pub per: Option<f64>,
    pub pbr: Option<f64>,
    pub roe_pct: Option<f64>,
    pub roa_pct: Option<f64>,
    pub roic_pct: Option<f64>,
    pub equity: Option<f64>,
    pub equity_unit: UnitScale,
}

/// A ticker the pipeline attempted but could not fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTicker {
    pub symbol: TickerSymbol,
    /// Stable machine-readable code from the fetch error (`fetch.*`).
    pub code: String,
    pub message: String,
}

impl FailedTicker {
    /// User-facing warning line for this failure.
    pub fn warning(&self) -> String {
        format!("{}: fetch failed", self.symbol)
    }
}

/// Ordered pipeline output: one row per successful ticker (input order)
/// plus the tickers that failed to fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub rows: Vec<DerivedRow>,
    pub failed: Vec<FailedTicker>,
    /// Distinct non-empty tickers the pipeline attempted.
    /// Always equals `rows.len() + failed.len()`.
    pub attempted: usize,
}

impl AggregationResult {
    /// True when every attempted ticker failed — the "no valid data"
    /// outcome, distinct from partial success.
    pub fn is_empty_outcome(&self) -> bool {
        self.rows.is_empty() && self.attempted > 0
    }

    /// Min/mean/max per metric over non-null values, in a fixed metric order.
    pub fn summary(&self) -> Vec<MetricSummary> {
        [
            ("per", collect(&self.rows, |row| row.per)),
            ("pbr", collect(&self.rows, |row| row.pbr)),
            ("roe_pct", collect(&self.rows, |row| row.roe_pct)),
            ("roa_pct", collect(&self.rows, |row| row.roa_pct)),
            ("roic_pct", collect(&self.rows, |row| row.roic_pct)),
            ("equity", collect(&self.rows, |row| row.equity)),
        ]
        .into_iter()
        .filter_map(|(metric, values)| MetricSummary::from_values(metric, &values))
        .collect()
    }
}

/// Cross-ticker statistics for one derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: String,
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl MetricSummary {
    fn from_values(metric: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }

        Some(Self {
            metric: metric.to_owned(),
            count: values.len(),
            min,
            mean: sum / values.len() as f64,
            max,
        })
    }
}

fn collect(rows: &[DerivedRow], field: impl Fn(&DerivedRow) -> Option<f64>) -> Vec<f64> {
    rows.iter().filter_map(field).collect()
}
