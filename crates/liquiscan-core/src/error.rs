use time::Date;

use thiserror::Error;

/// Validation errors for domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("bars must be ordered by ascending date (found {later} before {earlier})")]
    BarsOutOfOrder { earlier: Date, later: Date },
}

/// Fatal run-level configuration errors.
///
/// These are surfaced to the caller before any fetch begins; they are never
/// converted into per-ticker outcomes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("date range start {start} must be before end {end}")]
    InvalidDateRange { start: Date, end: Date },

    #[error("batch size must be greater than zero")]
    ZeroBatchSize,

    #[error("max concurrency must be greater than zero")]
    ZeroConcurrency,
}

/// Non-finite metric input for one ticker, e.g. a zero close price making
/// the spread percentage undefined.
///
/// Isolated per ticker exactly like a fetch error: it becomes a `Failure`
/// outcome and never leaks NaN or infinity into the report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DegenerateDataError {
    #[error("bar dated {date} has a zero close price")]
    ZeroClose { date: Date },

    #[error("computed {metric} is not finite")]
    NonFiniteMetric { metric: &'static str },
}
