use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::metric_source::{FetchError, MetricSource};
use crate::{ProviderId, RawSnapshot, TickerSymbol};

/// In-memory metric source for tests and offline runs.
///
/// Snapshots and failures are keyed by symbol; unknown symbols behave like
/// provider rejections. The call counter lets tests assert that input
/// validation happens before any fetch.
#[derive(Default)]
pub struct FixtureMetricSource {
    snapshots: BTreeMap<TickerSymbol, RawSnapshot>,
    failures: BTreeMap<TickerSymbol, FetchError>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FixtureMetricSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, symbol: TickerSymbol, snapshot: RawSnapshot) -> Self {
        self.snapshots.insert(symbol, snapshot);
        self
    }

    pub fn with_failure(mut self, symbol: TickerSymbol, error: FetchError) -> Self {
        self.failures.insert(symbol, error);
        self
    }

    /// Add artificial latency per fetch so concurrency behavior is observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl MetricSource for FixtureMetricSource {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<RawSnapshot, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }

            let outcome = if let Some(error) = self.failures.get(symbol) {
                Err(error.clone())
            } else if let Some(snapshot) = self.snapshots.get(symbol) {
                Ok(snapshot.clone())
            } else {
                Err(FetchError::invalid_symbol(symbol))
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            outcome
        })
    }
}
