use thiserror::Error;

/// Validation and contract errors exposed by `ratiolens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker symbol cannot be empty")]
    EmptySymbol,
    #[error("ticker symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("ticker symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid unit scale '{value}', expected one of raw, millions, hundred-millions, trillions")]
    InvalidUnitScale { value: String },
    #[error("invalid source '{value}', expected one of yahoo, fixture")]
    InvalidSource { value: String },
    #[error("invalid missing-field policy '{value}', expected one of zero-default, null-propagate")]
    InvalidMissingPolicy { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,

    #[error("label for '{symbol}' cannot be empty")]
    EmptyLabel { symbol: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
