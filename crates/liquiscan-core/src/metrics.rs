//! Liquidity metric computation and composite scoring.
//!
//! The composite score weighs average volume (log scale, 60%) against the
//! high/low range as a spread proxy (40%). It is documented as a 0-100
//! scale but deliberately left unclamped: extreme volume or a negative
//! spread component shows up as an out-of-range value instead of being
//! silently truncated. The 40/70 risk thresholds are exact.

use serde::{Deserialize, Serialize};

use crate::{DegenerateDataError, PriceSeries};

const VOLUME_WEIGHT: f64 = 0.6;
const SPREAD_WEIGHT: f64 = 0.4;

/// Averaged liquidity metrics for one ticker over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    /// Arithmetic mean of daily share volume.
    pub avg_volume: f64,
    /// Mean of close x volume per bar.
    pub avg_dollar_volume: f64,
    /// Mean of (high - low) / close x 100 per bar. A range proxy, not a
    /// quoted bid/ask spread.
    pub avg_spread_pct: f64,
    /// Close of the most recent bar, if finite.
    pub latest_close: Option<f64>,
}

/// Risk band derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band thresholds, inclusive on the lower bound: `>= 70` Low,
    /// `>= 40` Medium, below that High.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::Low
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Compute averaged metrics for a ticker's series.
///
/// Returns `Ok(None)` for an empty series; that is a normal outcome and the
/// caller must not derive a score from it. A zero close anywhere in the
/// series, or a non-finite mean, is degenerate price data and fails the
/// ticker outright rather than leaking NaN into the report.
pub fn compute(series: &PriceSeries) -> Result<Option<LiquidityMetrics>, DegenerateDataError> {
    if series.is_empty() {
        return Ok(None);
    }

    let mut volume_sum = 0.0_f64;
    let mut dollar_sum = 0.0_f64;
    let mut spread_sum = 0.0_f64;

    for bar in series.bars() {
        if bar.close == 0.0 {
            return Err(DegenerateDataError::ZeroClose { date: bar.date });
        }
        volume_sum += bar.volume as f64;
        dollar_sum += bar.close * bar.volume as f64;
        spread_sum += (bar.high - bar.low) / bar.close * 100.0;
    }

    let count = series.len() as f64;
    let avg_volume = volume_sum / count;
    let avg_dollar_volume = dollar_sum / count;
    let avg_spread_pct = spread_sum / count;

    if !avg_volume.is_finite() {
        return Err(DegenerateDataError::NonFiniteMetric {
            metric: "avg_volume",
        });
    }
    if !avg_dollar_volume.is_finite() {
        return Err(DegenerateDataError::NonFiniteMetric {
            metric: "avg_dollar_volume",
        });
    }
    if !avg_spread_pct.is_finite() {
        return Err(DegenerateDataError::NonFiniteMetric {
            metric: "avg_spread_pct",
        });
    }

    let latest_close = series
        .latest()
        .map(|bar| bar.close)
        .filter(|close| close.is_finite());

    Ok(Some(LiquidityMetrics {
        avg_volume,
        avg_dollar_volume,
        avg_spread_pct,
        latest_close,
    }))
}

/// Composite liquidity score.
///
/// `volume_score = log10(avg_volume) / 7`, floored at 0 for non-positive
/// volume; `spread_score = 1 - avg_spread_pct / 10`, floored at 0 for
/// non-positive spread. Weighted 60/40 and scaled to 100. Not clamped.
pub fn liquidity_score(avg_volume: f64, avg_spread_pct: f64) -> f64 {
    let volume_score = if avg_volume > 0.0 {
        avg_volume.log10() / 7.0
    } else {
        0.0
    };

    let spread_score = if avg_spread_pct > 0.0 {
        1.0 - avg_spread_pct / 10.0
    } else {
        0.0
    };

    (volume_score * VOLUME_WEIGHT + spread_score * SPREAD_WEIGHT) * 100.0
}
