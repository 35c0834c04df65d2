mod catalog;
mod cli;
mod error;
mod output;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

use liquiscan_core::{AnalysisConfig, BatchScheduler, DateRange, Symbol, YahooHistoryAdapter};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let symbols = resolve_symbols(&cli)?;
    let range = resolve_range(&cli)?;

    let config = AnalysisConfig {
        batch_size: cli.batch_size,
        max_concurrency: cli.max_concurrency,
        fetch_timeout: Duration::from_millis(cli.timeout_ms),
    };

    let mut scheduler = BatchScheduler::new(Arc::new(YahooHistoryAdapter::default()), config)?;
    if !cli.quiet {
        scheduler = scheduler
            .with_progress(|completed, total| eprintln!("analyzed {completed}/{total} tickers"));
    }

    // Ctrl-C stops at the next batch boundary; in-flight fetches finish and
    // the partial report is still rendered.
    let cancel = scheduler.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("cancellation requested; finishing current batch");
            cancel.cancel();
        }
    });

    let report = scheduler.analyze(&symbols, range).await;
    output::render(&report, cli.format)?;

    if report.summary.analyzed > 0 && report.summary.succeeded == 0 {
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_symbols(cli: &Cli) -> Result<Vec<Symbol>, CliError> {
    let group = cli.exchange_group.into();

    if !cli.symbols.is_empty() {
        return cli
            .symbols
            .iter()
            .map(|raw| Ok(Symbol::parse(raw)?.for_exchange(group)))
            .collect();
    }

    let path = cli
        .catalog
        .as_deref()
        .expect("clap requires --catalog or --symbols");
    Ok(catalog::load(path, group)?)
}

fn resolve_range(cli: &Cli) -> Result<DateRange, CliError> {
    let end = match &cli.end {
        Some(value) => parse_date(value)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let start = match &cli.start {
        Some(value) => parse_date(value)?,
        None => six_months_before(end),
    };

    Ok(DateRange::new(start, end)?)
}

fn parse_date(value: &str) -> Result<Date, CliError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| {
        CliError::InvalidDate {
            value: value.to_string(),
        }
    })
}

fn six_months_before(date: Date) -> Date {
    let mut year = date.year();
    let mut month = date.month() as i8 - 6;
    if month < 1 {
        month += 12;
        year -= 1;
    }
    let month = Month::try_from(month as u8).expect("month is within 1..=12");
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).expect("clamped day is valid for month")
}
