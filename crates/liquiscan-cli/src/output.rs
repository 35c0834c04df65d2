//! Report rendering for the terminal.

use liquiscan_core::{Report, TickerOutcome};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            print!("{}", render_table(report));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
            Ok(())
        }
        OutputFormat::Csv => {
            print!("{}", report.to_delimited());
            Ok(())
        }
    }
}

fn render_table(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(
        "┌────────────────┬──────────────┬──────────────────┬──────────┬─────────┬─────────┬──────────┐\n",
    );
    out.push_str(
        "│ Symbol         │ Avg Volume   │ Avg $ Volume     │ Spread % │ Score   │ Risk    │ Latest   │\n",
    );
    out.push_str(
        "├────────────────┼──────────────┼──────────────────┼──────────┼─────────┼─────────┼──────────┤\n",
    );

    for outcome in &report.outcomes {
        let line = match outcome {
            TickerOutcome::Success {
                symbol,
                metrics,
                score,
                risk,
            } => format!(
                "│ {:14} │ {:>12} │ {:>16} │ {:>8.4} │ {:>7.1} │ {:7} │ {:>8} │\n",
                symbol.as_str(),
                group_thousands(metrics.avg_volume),
                format!("${:.0}", metrics.avg_dollar_volume),
                metrics.avg_spread_pct,
                score,
                risk.as_str(),
                metrics
                    .latest_close
                    .map(|close| format!("{close:.2}"))
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
            TickerOutcome::Empty { symbol } => format!(
                "│ {:14} │ {:>12} │ {:>16} │ {:>8} │ {:>7} │ {:7} │ {:>8} │\n",
                symbol.as_str(),
                "n/a",
                "n/a",
                "n/a",
                "n/a",
                "NO DATA",
                "n/a",
            ),
            TickerOutcome::Failure { symbol, .. } => format!(
                "│ {:14} │ {:>12} │ {:>16} │ {:>8} │ {:>7} │ {:7} │ {:>8} │\n",
                symbol.as_str(),
                "n/a",
                "n/a",
                "n/a",
                "n/a",
                "ERROR",
                "n/a",
            ),
        };
        out.push_str(&line);
    }

    out.push_str(
        "└────────────────┴──────────────┴──────────────────┴──────────┴─────────┴─────────┴──────────┘\n",
    );

    let summary = &report.summary;
    out.push_str(&format!(
        "analyzed: {}  succeeded: {}  high-risk: {}  avg score: {}\n",
        summary.analyzed,
        summary.succeeded,
        summary.high_risk,
        summary
            .average_score
            .map(|score| format!("{score:.1}"))
            .unwrap_or_else(|| "n/a".to_string()),
    ));

    out
}

fn group_thousands(value: f64) -> String {
    let whole = value.round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquiscan_core::{LiquidityMetrics, RiskLevel, Symbol};

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(0.0), "0");
    }

    #[test]
    fn table_renders_markers_for_failed_rows() {
        let report = Report::build(vec![
            TickerOutcome::Success {
                symbol: Symbol::parse("AAPL").expect("valid symbol"),
                metrics: LiquidityMetrics {
                    avg_volume: 52_000_000.0,
                    avg_dollar_volume: 9.1e9,
                    avg_spread_pct: 1.2,
                    latest_close: Some(178.52),
                },
                score: 88.0,
                risk: RiskLevel::Low,
            },
            TickerOutcome::Empty {
                symbol: Symbol::parse("GONE").expect("valid symbol"),
            },
        ]);

        let table = render_table(&report);
        assert!(table.contains("AAPL"));
        assert!(table.contains("52,000,000"));
        assert!(table.contains("NO DATA"));
        assert!(table.contains("avg score: 88.0"));
    }
}
