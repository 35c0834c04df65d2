//! History source contract and typed fetch errors.
//!
//! A `HistorySource` performs exactly one network round-trip per call and
//! must distinguish three outcomes:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok` with bars | history available for the range |
//! | `Ok` empty | provider has no data for the range (delisted, no trading days) |
//! | `Err(FetchError)` | transport or provider failure |
//!
//! Retries are deliberately not a source concern; the scheduler owns any
//! pacing or retry policy the caller wants.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DateRange, PriceSeries, Symbol};

/// Fetch error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Provider or network unavailable.
    Unavailable,
    /// Provider signalled rate limiting.
    RateLimited,
    /// Request rejected as invalid by the provider.
    InvalidRequest,
    /// The fetch exceeded its time budget.
    Timeout,
    /// Provider responded with a payload that could not be interpreted.
    Malformed,
}

/// Structured per-ticker fetch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
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

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Timeout,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Malformed,
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
            FetchErrorKind::Unavailable => "fetch.unavailable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::InvalidRequest => "fetch.invalid_request",
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Malformed => "fetch.malformed",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Provider contract for daily history.
///
/// Implementations must be `Send + Sync`; the scheduler shares one source
/// across its worker tasks.
pub trait HistorySource: Send + Sync {
    /// Fetch the daily bar series for `symbol` within `range`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport or provider failure; a range
    /// with no data is an empty `Ok` series, never an error.
    fn daily_bars<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, FetchError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(FetchError::timeout("slow").code(), "fetch.timeout");
        assert_eq!(FetchError::malformed("bad json").code(), "fetch.malformed");
    }

    #[test]
    fn retryability_follows_kind() {
        assert!(FetchError::unavailable("down").retryable());
        assert!(FetchError::rate_limited("429").retryable());
        assert!(!FetchError::invalid_request("bad symbol").retryable());
        assert!(!FetchError::malformed("bad json").retryable());
    }
}
