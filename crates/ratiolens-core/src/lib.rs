//! Core contracts for ratiolens.
//!
//! This crate contains:
//! - Canonical domain models and validation (symbols, snapshots, unit scales)
//! - The metric-source abstraction and its Yahoo/fixture adapters
//! - The pure ratio calculator with an explicit missing-field policy
//! - The bounded-parallel aggregation pipeline with progress reporting
//! - Pacing, retry, and report envelope support
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Metric-source implementations (Yahoo, in-memory fixture) |
//! | [`calculator`] | Ratio derivation and missing-field policy |
//! | [`domain`] | Domain models (TickerSymbol, RawSnapshot, DerivedRow) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`labels`] | Externally supplied symbol labels |
//! | [`metric_source`] | Provider trait and fetch error taxonomy |
//! | [`pacing`] | Quota-based request pacing |
//! | [`pipeline`] | Ticker aggregation pipeline |
//! | [`report`] | Output report envelope |
//! | [`retry`] | Retry policy for transient fetch failures |
//! | [`source`] | Provider identifiers |

pub mod adapters;
pub mod calculator;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod labels;
pub mod metric_source;
pub mod pacing;
pub mod pipeline;
pub mod report;
pub mod retry;
pub mod source;

pub use adapters::{FixtureMetricSource, YahooMetricSource};
pub use calculator::{MissingFieldPolicy, RatioCalculator};
pub use domain::{
    parse_ticker_list, AggregationResult, DerivedRow, FailedTicker, MetricSummary, RawSnapshot,
    TickerSymbol, UnitScale, UtcDateTime,
};
pub use error::{CoreError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use labels::LabelOverrides;
pub use metric_source::{FetchError, FetchErrorKind, MetricSource};
pub use pacing::RequestPacer;
pub use pipeline::{
    AggregationPipeline, PipelineConfig, PipelineError, ProgressObserver, ProgressUpdate,
};
pub use report::{Report, ReportMeta};
pub use retry::{Backoff, RetryPolicy};
pub use source::ProviderId;
