use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::calculator::{MissingFieldPolicy, RatioCalculator};
use crate::labels::LabelOverrides;
use crate::metric_source::{FetchError, MetricSource};
use crate::pacing::RequestPacer;
use crate::retry::RetryPolicy;
use crate::{AggregationResult, FailedTicker, RawSnapshot, TickerSymbol, UnitScale};

/// Pipeline-level failures. Per-ticker fetch errors are data, not errors;
/// only problems with the run itself surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("ticker list is empty after trimming and deduplication")]
    EmptyTickerList,

    #[error("aggregation worker failed: {0}")]
    Worker(String),
}

/// Tuning knobs for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub unit_scale: UnitScale,
    pub missing_policy: MissingFieldPolicy,
    /// Upper bound on concurrent fetches; clamped to at least 1.
    pub concurrency: usize,
    /// Fixed pause before every upstream call, on top of any pacer quota.
    pub per_call_delay: Option<Duration>,
    pub retry: RetryPolicy,
    pub labels: LabelOverrides,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            unit_scale: UnitScale::HundredMillions,
            missing_policy: MissingFieldPolicy::default(),
            concurrency: 4,
            per_call_delay: None,
            retry: RetryPolicy::default(),
            labels: LabelOverrides::new(),
        }
    }
}

/// Per-ticker completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
}

impl ProgressUpdate {
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Observer invoked once per settled ticker, in completion order.
/// `completed` is monotonically non-decreasing and reaches `total`.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn on_progress(&self, update: ProgressUpdate) {
        self(update)
    }
}

/// Orchestrates MetricSource and RatioCalculator across a ticker list.
///
/// Fetches fan out under a bounded semaphore; results land in
/// index-addressed slots so output order always matches input order. One
/// ticker's failure never cancels the others.
pub struct AggregationPipeline {
    source: Arc<dyn MetricSource>,
    calculator: RatioCalculator,
    config: PipelineConfig,
    pacer: Option<RequestPacer>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl AggregationPipeline {
    pub fn new(source: Arc<dyn MetricSource>, config: PipelineConfig) -> Self {
        let calculator = RatioCalculator::new(config.unit_scale, config.missing_policy);
        Self {
            source,
            calculator,
            config,
            pacer: None,
            observer: None,
        }
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = Some(pacer);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the aggregation over the given tickers.
    ///
    /// The input is deduplicated preserving first-seen order; an empty list
    /// is rejected before any fetch is attempted.
    pub async fn run(
        &self,
        tickers: &[TickerSymbol],
    ) -> Result<AggregationResult, PipelineError> {
        let tickers = dedupe(tickers);
        if tickers.is_empty() {
            return Err(PipelineError::EmptyTickerList);
        }

        let total = tickers.len();
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let completed = AtomicUsize::new(0);
        let mut join_set = JoinSet::new();

        for (index, symbol) in tickers.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let pacer = self.pacer.clone();
            let per_call_delay = self.config.per_call_delay;
            let retry = self.config.retry.clone();

            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("pipeline semaphore is never closed");

                if let Some(pacer) = &pacer {
                    pacer.acquire().await;
                }
                if let Some(delay) = per_call_delay {
                    tokio::time::sleep(delay).await;
                }

                let outcome = fetch_with_retry(source.as_ref(), &symbol, &retry).await;
                (index, symbol, outcome)
            });
        }

        let mut slots: Vec<Option<(TickerSymbol, Result<RawSnapshot, FetchError>)>> =
            (0..total).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            let (index, symbol, outcome) =
                joined.map_err(|error| PipelineError::Worker(error.to_string()))?;
            slots[index] = Some((symbol, outcome));

            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(observer) = &self.observer {
                observer.on_progress(ProgressUpdate {
                    completed: done,
                    total,
                });
            }
        }

        let mut rows = Vec::new();
        let mut failed = Vec::new();
        for slot in slots {
            match slot {
                Some((symbol, Ok(snapshot))) => {
                    let mut row = self.calculator.derive(&symbol, &snapshot);
                    if let Some(label) = self.config.labels.label_for(&symbol) {
                        row.name = label.to_owned();
                    }
                    rows.push(row);
                }
                Some((symbol, Err(error))) => {
                    warn!(symbol = %symbol, code = error.code(), "ticker fetch failed: {}", error.message());
                    failed.push(FailedTicker {
                        symbol,
                        code: error.code().to_owned(),
                        message: error.message().to_owned(),
                    });
                }
                // Unreachable: every spawned task reports exactly once.
                None => continue,
            }
        }

        Ok(AggregationResult {
            rows,
            failed,
            attempted: total,
        })
    }
}

async fn fetch_with_retry(
    source: &dyn MetricSource,
    symbol: &TickerSymbol,
    retry: &RetryPolicy,
) -> Result<RawSnapshot, FetchError> {
    let mut attempt = 0;
    loop {
        match source.fetch(symbol).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(error) => {
                if !retry.should_retry(&error, attempt) {
                    return Err(error);
                }
                let delay = retry.delay_for_attempt(attempt);
                debug!(symbol = %symbol, attempt, "retrying fetch in {:?}: {}", delay, error.message());
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

fn dedupe(tickers: &[TickerSymbol]) -> Vec<TickerSymbol> {
    let mut seen = Vec::with_capacity(tickers.len());
    for symbol in tickers {
        if !seen.contains(symbol) {
            seen.push(symbol.clone());
        }
    }
    seen
}
