//! Ranked report assembly and export.

use serde::Serialize;

use crate::outcome::TickerOutcome;
use crate::metrics::RiskLevel;

const NOT_AVAILABLE: &str = "n/a";

/// Summary over the run, counting every outcome but averaging only the
/// successful subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Total outcomes, success or not.
    pub analyzed: usize,
    /// Outcomes with computed metrics and score.
    pub succeeded: usize,
    /// Mean score over successful outcomes; `None` when there are none.
    pub average_score: Option<f64>,
    /// Successful outcomes classified `RiskLevel::High`.
    pub high_risk: usize,
}

/// Ordered analysis report.
///
/// Success entries first, sorted by score descending with ties broken by
/// symbol ascending; Empty and Failure entries follow in their original
/// encounter order. Built fresh per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub outcomes: Vec<TickerOutcome>,
    pub summary: SummaryStats,
}

impl Report {
    /// Assemble a report from per-ticker outcomes.
    ///
    /// Pure and total: never fails, and an empty input yields an empty
    /// report with an absent average.
    pub fn build(outcomes: Vec<TickerOutcome>) -> Self {
        let mut ranked = Vec::with_capacity(outcomes.len());
        let mut rest = Vec::new();

        for outcome in outcomes {
            if outcome.is_success() {
                ranked.push(outcome);
            } else {
                rest.push(outcome);
            }
        }

        ranked.sort_by(|a, b| match (a, b) {
            (
                TickerOutcome::Success {
                    score: score_a,
                    symbol: symbol_a,
                    ..
                },
                TickerOutcome::Success {
                    score: score_b,
                    symbol: symbol_b,
                    ..
                },
            ) => score_b.total_cmp(score_a).then_with(|| symbol_a.cmp(symbol_b)),
            _ => std::cmp::Ordering::Equal,
        });

        let succeeded = ranked.len();
        let analyzed = succeeded + rest.len();

        let score_sum: f64 = ranked
            .iter()
            .map(|outcome| match outcome {
                TickerOutcome::Success { score, .. } => *score,
                _ => 0.0,
            })
            .sum();
        let average_score = (succeeded > 0).then(|| score_sum / succeeded as f64);

        let high_risk = ranked
            .iter()
            .filter(|outcome| {
                matches!(
                    outcome,
                    TickerOutcome::Success {
                        risk: RiskLevel::High,
                        ..
                    }
                )
            })
            .count();

        ranked.extend(rest);

        Self {
            outcomes: ranked,
            summary: SummaryStats {
                analyzed,
                succeeded,
                average_score,
                high_risk,
            },
        }
    }

    /// Serialize the report as delimited text for export.
    ///
    /// Numeric fields of non-Success rows are an explicit `n/a` marker; the
    /// risk column reads `NO DATA` for empty tickers and `ERROR` for failed
    /// ones.
    pub fn to_delimited(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());

        // Writing owned string records to a Vec cannot fail.
        writer
            .write_record([
                "Symbol",
                "Avg Volume",
                "Avg Dollar Volume",
                "Avg Spread %",
                "Liquidity Score",
                "Risk Level",
                "Latest Price",
            ])
            .expect("in-memory csv write cannot fail");

        for outcome in &self.outcomes {
            let record = match outcome {
                TickerOutcome::Success {
                    symbol,
                    metrics,
                    score,
                    risk,
                } => [
                    symbol.as_str().to_string(),
                    format!("{:.0}", metrics.avg_volume),
                    format!("{:.2}", metrics.avg_dollar_volume),
                    format!("{:.4}", metrics.avg_spread_pct),
                    format!("{score:.1}"),
                    risk.as_str().to_string(),
                    metrics
                        .latest_close
                        .map(|close| format!("{close:.2}"))
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ],
                TickerOutcome::Empty { symbol } => not_available_row(symbol.as_str(), "NO DATA"),
                TickerOutcome::Failure { symbol, .. } => {
                    not_available_row(symbol.as_str(), "ERROR")
                }
            };
            writer
                .write_record(&record)
                .expect("in-memory csv write cannot fail");
        }

        let bytes = writer
            .into_inner()
            .expect("in-memory csv flush cannot fail");
        String::from_utf8(bytes).expect("csv output is UTF-8")
    }
}

fn not_available_row(symbol: &str, risk_label: &str) -> [String; 7] {
    [
        symbol.to_string(),
        NOT_AVAILABLE.to_string(),
        NOT_AVAILABLE.to_string(),
        NOT_AVAILABLE.to_string(),
        NOT_AVAILABLE.to_string(),
        risk_label.to_string(),
        NOT_AVAILABLE.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;
    use crate::metrics::LiquidityMetrics;
    use crate::outcome::TickerError;
    use crate::Symbol;

    fn success(symbol: &str, score: f64) -> TickerOutcome {
        TickerOutcome::Success {
            symbol: Symbol::parse(symbol).expect("valid symbol"),
            metrics: LiquidityMetrics {
                avg_volume: 1.0e6,
                avg_dollar_volume: 2.5e7,
                avg_spread_pct: 1.5,
                latest_close: Some(25.0),
            },
            score,
            risk: RiskLevel::from_score(score),
        }
    }

    fn empty(symbol: &str) -> TickerOutcome {
        TickerOutcome::Empty {
            symbol: Symbol::parse(symbol).expect("valid symbol"),
        }
    }

    fn failure(symbol: &str) -> TickerOutcome {
        TickerOutcome::Failure {
            symbol: Symbol::parse(symbol).expect("valid symbol"),
            error: TickerError::Fetch(FetchError::unavailable("down")),
        }
    }

    #[test]
    fn success_entries_rank_by_score_then_symbol() {
        let report = Report::build(vec![
            success("BBB", 50.0),
            success("AAA", 50.0),
            success("CCC", 80.0),
        ]);

        let order: Vec<&str> = report
            .outcomes
            .iter()
            .map(|o| o.symbol().as_str())
            .collect();
        assert_eq!(order, vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn non_success_entries_keep_encounter_order_after_successes() {
        let report = Report::build(vec![
            failure("ERR1"),
            success("WIN", 60.0),
            empty("GAP"),
            failure("ERR2"),
        ]);

        let order: Vec<&str> = report
            .outcomes
            .iter()
            .map(|o| o.symbol().as_str())
            .collect();
        assert_eq!(order, vec!["WIN", "ERR1", "GAP", "ERR2"]);
    }

    #[test]
    fn summary_counts_only_successes() {
        let report = Report::build(vec![
            success("AAA", 96.0),
            success("BBB", 30.0),
            empty("GAP"),
            failure("ERR"),
        ]);

        assert_eq!(report.summary.analyzed, 4);
        assert_eq!(report.summary.succeeded, 2);
        assert_eq!(report.summary.average_score, Some(63.0));
        assert_eq!(report.summary.high_risk, 1);
    }

    #[test]
    fn empty_input_builds_empty_report() {
        let report = Report::build(Vec::new());
        assert!(report.outcomes.is_empty());
        assert_eq!(report.summary.analyzed, 0);
        assert_eq!(report.summary.average_score, None);
    }

    #[test]
    fn build_is_deterministic() {
        let outcomes = vec![
            success("BBB", 50.0),
            success("AAA", 50.0),
            empty("GAP"),
            failure("ERR"),
        ];

        let first = Report::build(outcomes.clone());
        let second = Report::build(outcomes);
        assert_eq!(first, second);
        assert_eq!(first.to_delimited(), second.to_delimited());
    }

    #[test]
    fn delimited_export_marks_unavailable_fields() {
        let report = Report::build(vec![success("WIN", 96.0), failure("ERR"), empty("GAP")]);
        let csv = report.to_delimited();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Symbol,Avg Volume,Avg Dollar Volume,Avg Spread %,Liquidity Score,Risk Level,Latest Price"
        );
        assert!(lines[1].starts_with("WIN,"));
        assert_eq!(lines[2], "ERR,n/a,n/a,n/a,n/a,ERROR,n/a");
        assert_eq!(lines[3], "GAP,n/a,n/a,n/a,n/a,NO DATA,n/a");
    }
}
