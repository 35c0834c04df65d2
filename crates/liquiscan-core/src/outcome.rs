use std::fmt::{Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::fetcher::FetchError;
use crate::metrics::{LiquidityMetrics, RiskLevel};
use crate::{DegenerateDataError, Symbol};

/// Why a ticker failed.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerError {
    Fetch(FetchError),
    DegenerateData(DegenerateDataError),
    /// Worker task aborted before producing an outcome (panic or runtime
    /// shutdown).
    Worker(String),
}

impl TickerError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Fetch(error) => error.code(),
            Self::DegenerateData(_) => "metrics.degenerate_data",
            Self::Worker(_) => "scheduler.worker_aborted",
        }
    }
}

impl Display for TickerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(error) => error.fmt(f),
            Self::DegenerateData(error) => write!(f, "{error} ({})", self.code()),
            Self::Worker(message) => write!(f, "{message} ({})", self.code()),
        }
    }
}

impl Serialize for TickerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TickerError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<FetchError> for TickerError {
    fn from(error: FetchError) -> Self {
        Self::Fetch(error)
    }
}

impl From<DegenerateDataError> for TickerError {
    fn from(error: DegenerateDataError) -> Self {
        Self::DegenerateData(error)
    }
}

/// Result of analyzing exactly one input ticker.
///
/// Immutable once produced; the scheduler emits one per input symbol and
/// hands the whole sequence to the report builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerOutcome {
    /// Metrics and score were computed.
    Success {
        symbol: Symbol,
        metrics: LiquidityMetrics,
        score: f64,
        risk: RiskLevel,
    },
    /// Provider had no data for the range. Not a failure.
    Empty { symbol: Symbol },
    /// Fetch or metric computation failed for this ticker.
    Failure { symbol: Symbol, error: TickerError },
}

impl TickerOutcome {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Success { symbol, .. } | Self::Empty { symbol } | Self::Failure { symbol, .. } => {
                symbol
            }
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
