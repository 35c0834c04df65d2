//! CLI argument definitions for Liquiscan.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--catalog` | — | CSV ticker catalog with a `Symbol` column |
//! | `--symbols` | — | Inline symbols, alternative to a catalog |
//! | `--start` / `--end` | last six months | ISO analysis window |
//! | `--exchange-group` | `us` | Suffix normalization applied to catalog symbols |
//! | `--batch-size` | `10` | Tickers per sequential batch |
//! | `--max-concurrency` | `5` | Concurrent fetches within a batch |
//! | `--timeout-ms` | `10000` | Per-fetch time budget |
//! | `--format` | `table` | Output format (table, json, csv) |
//!
//! # Examples
//!
//! ```bash
//! # Analyze a catalog over the default six-month window
//! liquiscan --catalog stocklist.csv
//!
//! # Inline NSE symbols, CSV export
//! liquiscan --symbols RELIANCE TCS INFY --exchange-group nse --format csv
//! ```

use clap::{Parser, ValueEnum};

/// Liquiscan - bulk stock liquidity-risk analysis
///
/// Downloads daily price/volume history per ticker and ranks the universe
/// by a composite liquidity score, tolerating per-ticker failures.
#[derive(Debug, Parser)]
#[command(
    name = "liquiscan",
    author,
    version,
    about = "Bulk stock liquidity-risk analysis"
)]
pub struct Cli {
    /// Path to a CSV ticker catalog with a 'Symbol' column.
    #[arg(long, conflicts_with = "symbols", required_unless_present = "symbols")]
    pub catalog: Option<std::path::PathBuf>,

    /// Inline ticker symbols instead of a catalog file.
    #[arg(long, num_args = 1..)]
    pub symbols: Vec<String>,

    /// Analysis window start (ISO date, e.g. 2024-01-01).
    ///
    /// Defaults to six months before the end date.
    #[arg(long)]
    pub start: Option<String>,

    /// Analysis window end (ISO date). Defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Exchange group for suffix normalization of catalog symbols.
    #[arg(long, value_enum, default_value_t = ExchangeGroupArg::Us)]
    pub exchange_group: ExchangeGroupArg,

    /// Tickers per sequential batch.
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,

    /// Concurrent fetches within a batch.
    #[arg(long, default_value_t = 5)]
    pub max_concurrency: usize,

    /// Per-fetch time budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Suppress per-batch progress on stderr.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Delimited export with explicit n/a markers.
    Csv,
}

/// Exchange groups understood by the symbol normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExchangeGroupArg {
    /// US exchanges, no suffix.
    Us,
    /// National Stock Exchange of India (.NS suffix).
    Nse,
}

impl From<ExchangeGroupArg> for liquiscan_core::ExchangeGroup {
    fn from(value: ExchangeGroupArg) -> Self {
        match value {
            ExchangeGroupArg::Us => Self::Us,
            ExchangeGroupArg::Nse => Self::Nse,
        }
    }
}
