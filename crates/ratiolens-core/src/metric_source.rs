use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, RawSnapshot, TickerSymbol};

/// Classification of a single-ticker fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    InvalidSymbol,
    Unavailable,
    RateLimited,
    MissingData,
    Internal,
}

/// Structured per-ticker fetch error.
///
/// A `FetchError` never aborts a pipeline run; the pipeline records the
/// ticker as failed and moves on. `retryable()` tells the pipeline whether
/// another attempt is worth making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn invalid_symbol(symbol: &TickerSymbol) -> Self {
        Self {
            kind: FetchErrorKind::InvalidSymbol,
            message: format!("provider does not recognize symbol '{symbol}'"),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn missing_data(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::MissingData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::InvalidSymbol => "fetch.invalid_symbol",
            FetchErrorKind::Unavailable => "fetch.unavailable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::MissingData => "fetch.missing_data",
            FetchErrorKind::Internal => "fetch.internal",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Provider abstraction: one snapshot per ticker per call.
///
/// Implementations make a single attempt; retry orchestration belongs to
/// the pipeline.
pub trait MetricSource: Send + Sync {
    fn id(&self) -> ProviderId;

    fn fetch<'a>(
        &'a self,
        symbol: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<RawSnapshot, FetchError>> + Send + 'a>>;
}
