//! Batched, bounded-concurrency analysis scheduler.
//!
//! Symbols are partitioned into contiguous batches that run strictly one
//! after another; within a batch up to `max_concurrency` fetch+score tasks
//! run concurrently behind a semaphore. Task handles are joined in dispatch
//! order, so the outcome sequence always matches the input symbol order —
//! the report builder relies on that stable encounter order for its
//! Empty/Failure ordering.
//!
//! Failure isolation is per ticker: a fetch error, degenerate metric, fetch
//! timeout, or worker panic produces a `Failure` outcome for that ticker
//! only and never aborts the batch or the run.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::fetcher::{FetchError, HistorySource};
use crate::metrics::{self, RiskLevel};
use crate::outcome::TickerOutcome;
use crate::report::Report;
use crate::{ConfigError, DateRange, Symbol};

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Tickers per sequential batch.
    pub batch_size: usize,
    /// Concurrent fetch+score tasks within a batch.
    pub max_concurrency: usize,
    /// Time budget per fetch; overruns become `FetchErrorKind::Timeout`
    /// failures instead of stalling the batch.
    pub fetch_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_concurrency: 5,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

/// Batch-boundary progress observer: `(completed, total)`.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Cooperative cancellation handle.
///
/// Observed at batch boundaries: in-flight workers of the current batch
/// finish, remaining batches are skipped, and the partial outcome list is
/// returned.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Drives fetch+score work for a symbol universe.
pub struct BatchScheduler {
    source: Arc<dyn HistorySource>,
    config: AnalysisConfig,
    progress: Option<Arc<ProgressFn>>,
    cancel: CancelToken,
}

impl BatchScheduler {
    /// Build a scheduler, validating configuration before any fetch can
    /// begin.
    pub fn new(source: Arc<dyn HistorySource>, config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            progress: None,
            cancel: CancelToken::new(),
        })
    }

    /// Install a batch-boundary progress observer.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Handle for cancelling the run from another task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the full analysis and build the ranked report.
    pub async fn analyze(&self, symbols: &[Symbol], range: DateRange) -> Report {
        let outcomes = self.run(symbols, range).await;
        Report::build(outcomes)
    }

    /// Produce exactly one outcome per input symbol, in input order.
    pub async fn run(&self, symbols: &[Symbol], range: DateRange) -> Vec<TickerOutcome> {
        let total = symbols.len();
        let mut outcomes = Vec::with_capacity(total);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));

        for batch in symbols.chunks(self.config.batch_size) {
            if self.cancel.is_cancelled() {
                break;
            }

            let mut handles = Vec::with_capacity(batch.len());
            for symbol in batch {
                let source = Arc::clone(&self.source);
                let semaphore = Arc::clone(&semaphore);
                let symbol = symbol.clone();
                let timeout = self.config.fetch_timeout;

                handles.push((
                    symbol.clone(),
                    tokio::spawn(async move {
                        let _permit = semaphore
                            .acquire_owned()
                            .await
                            .expect("analysis semaphore is never closed");
                        analyze_ticker(source.as_ref(), symbol, range, timeout).await
                    }),
                ));
            }

            // Join in dispatch order; a panicked worker becomes a Failure
            // for its ticker only.
            for (symbol, handle) in handles {
                let outcome = match handle.await {
                    Ok(outcome) => outcome,
                    Err(join_error) => TickerOutcome::Failure {
                        symbol,
                        error: crate::outcome::TickerError::Worker(format!(
                            "analysis task aborted: {join_error}"
                        )),
                    },
                };
                outcomes.push(outcome);
            }

            self.report_progress(outcomes.len(), total);
        }

        outcomes
    }

    fn report_progress(&self, completed: usize, total: usize) {
        if let Some(progress) = &self.progress {
            let progress = Arc::clone(progress);
            // A panicking observer must not poison the run.
            let _ = catch_unwind(AssertUnwindSafe(|| progress(completed, total)));
        }
    }
}

async fn analyze_ticker(
    source: &dyn HistorySource,
    symbol: Symbol,
    range: DateRange,
    timeout: Duration,
) -> TickerOutcome {
    let fetched = match tokio::time::timeout(timeout, source.daily_bars(&symbol, range)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::timeout(format!(
            "fetch exceeded {}ms budget",
            timeout.as_millis()
        ))),
    };

    let series = match fetched {
        Ok(series) => series,
        Err(error) => {
            return TickerOutcome::Failure {
                symbol,
                error: error.into(),
            }
        }
    };

    match metrics::compute(&series) {
        Ok(None) => TickerOutcome::Empty { symbol },
        Ok(Some(metrics)) => {
            let score = metrics::liquidity_score(metrics.avg_volume, metrics.avg_spread_pct);
            TickerOutcome::Success {
                symbol,
                metrics,
                score,
                risk: RiskLevel::from_score(score),
            }
        }
        Err(error) => TickerOutcome::Failure {
            symbol,
            error: error.into(),
        },
    }
}
