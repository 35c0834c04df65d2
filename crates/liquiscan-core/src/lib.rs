//! # Liquiscan Core
//!
//! Bulk concurrent liquidity-risk analysis engine.
//!
//! Given an ordered ticker universe and a date range, the engine fetches
//! daily OHLCV history per ticker, computes averaged liquidity metrics and a
//! weighted composite score, and aggregates everything into a ranked report.
//! One ticker's failure never aborts the run: fetch errors, degenerate price
//! data, and timeouts become per-ticker `Failure` outcomes.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance daily history) |
//! | [`domain`] | Domain types (Symbol, DateRange, Bar, PriceSeries) |
//! | [`error`] | Validation and configuration errors |
//! | [`fetcher`] | History source trait and typed fetch errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`metrics`] | Liquidity metrics and composite score |
//! | [`outcome`] | Per-ticker outcome union |
//! | [`report`] | Ranked report and summary statistics |
//! | [`scheduler`] | Batched bounded-concurrency scheduler |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use liquiscan_core::{
//!     AnalysisConfig, BatchScheduler, DateRange, Symbol, YahooHistoryAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let symbols = vec![Symbol::parse("AAPL")?, Symbol::parse("MSFT")?];
//!     let range = DateRange::new(start, end)?;
//!
//!     let scheduler = BatchScheduler::new(
//!         Arc::new(YahooHistoryAdapter::default()),
//!         AnalysisConfig::default(),
//!     )?
//!     .with_progress(|done, total| eprintln!("{done}/{total}"));
//!
//!     let report = scheduler.analyze(&symbols, range).await;
//!     println!("{}", report.to_delimited());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only configuration errors (inverted date range, zero batch size or
//! concurrency) halt a run, and they surface before any fetch begins. Every
//! per-ticker condition is caught at the ticker boundary and recorded as an
//! outcome, so the caller can always render a report.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod metrics;
pub mod outcome;
pub mod report;
pub mod scheduler;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::YahooHistoryAdapter;

// Domain types
pub use domain::{Bar, DateRange, ExchangeGroup, PriceSeries, Symbol};

// Error types
pub use error::{ConfigError, DegenerateDataError, ValidationError};

// History source contract
pub use fetcher::{FetchError, FetchErrorKind, HistorySource};

// HTTP transport
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};

// Metrics and scoring
pub use metrics::{compute, liquidity_score, LiquidityMetrics, RiskLevel};

// Outcomes and reporting
pub use outcome::{TickerError, TickerOutcome};
pub use report::{Report, SummaryStats};

// Scheduler
pub use scheduler::{AnalysisConfig, BatchScheduler, CancelToken, ProgressFn};
