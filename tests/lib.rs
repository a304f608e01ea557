// Shared helpers for ratiolens behavior tests
pub use ratiolens_core::{
    adapters::{FixtureMetricSource, YahooMetricSource},
    calculator::{MissingFieldPolicy, RatioCalculator},
    metric_source::{FetchError, FetchErrorKind, MetricSource},
    pipeline::{AggregationPipeline, PipelineConfig, PipelineError, ProgressUpdate},
    retry::RetryPolicy,
    LabelOverrides, RawSnapshot, TickerSymbol, UnitScale,
};
pub use std::sync::Arc;

pub fn symbol(raw: &str) -> TickerSymbol {
    TickerSymbol::parse(raw).expect("test symbols are valid")
}

/// Snapshot with every numeric field populated, for happy-path runs.
pub fn full_snapshot() -> RawSnapshot {
    RawSnapshot {
        short_name: Some(String::from("Example Co")),
        long_name: Some(String::from("Example Company, Inc.")),
        current_price: Some(1234.0),
        forward_pe: Some(14.5),
        trailing_pe: Some(16.1),
        price_to_book: Some(1.8),
        return_on_equity: Some(0.15),
        return_on_assets: Some(0.06),
        operating_margins: Some(0.22),
        total_stockholder_equity: Some(5_000_000_000.0),
        total_debt: Some(2_000_000_000.0),
        total_assets: Some(12_000_000_000.0),
        dividend_yield: Some(0.021),
        debt_to_equity: Some(40.0),
    }
}

pub fn no_retry_config() -> PipelineConfig {
    PipelineConfig {
        retry: RetryPolicy::no_retry(),
        ..PipelineConfig::default()
    }
}
