//! Confluence scoring — reduce the latest indicator row to a composite
//! score and a discrete signal label.
//!
//! The weekly (coarse) snapshot sets the directional bias; the daily (fine)
//! snapshot adds timing refinement. Each condition contributes only when its
//! inputs are available — a missing 200-period average is a zero
//! contribution, not an error. All weights, thresholds, and label
//! breakpoints live in `ScoringConfig`.

use crate::frame::IndicatorSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weights, thresholds, and breakpoints for the confluence score.
///
/// The defaults are one variant's tuning, not a canonical truth — load a
/// TOML override to experiment with different weightings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// MACD bullish/bearish alignment (histogram and line vs signal agree).
    pub macd_weight: f64,
    /// RSI inside the neutral-bullish band.
    pub rsi_weight: f64,
    pub rsi_band_low: f64,
    pub rsi_band_high: f64,
    /// Close above the fast EMA.
    pub ema_fast_weight: f64,
    /// Close above the mid EMA.
    pub ema_mid_weight: f64,
    /// Weekly close above/below the long SMA.
    pub weekly_weight: f64,
    /// Weekly mid SMA also above/below the long SMA (stronger regime).
    pub weekly_strong_weight: f64,
    /// Label breakpoints (inclusive, mirrored for the sell side).
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            macd_weight: 1.5,
            rsi_weight: 1.0,
            rsi_band_low: 35.0,
            rsi_band_high: 55.0,
            ema_fast_weight: 0.8,
            ema_mid_weight: 0.5,
            weekly_weight: 1.0,
            weekly_strong_weight: 2.0,
            strong_threshold: 3.5,
            moderate_threshold: 1.5,
        }
    }
}

impl ScoringConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Discrete judgment derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalLabel {
    /// Step function over the composite score. Breakpoints are inclusive:
    /// exactly `strong_threshold` maps to the strong label.
    pub fn from_score(score: f64, config: &ScoringConfig) -> Self {
        if score >= config.strong_threshold {
            SignalLabel::StrongBuy
        } else if score >= config.moderate_threshold {
            SignalLabel::Buy
        } else if score <= -config.strong_threshold {
            SignalLabel::StrongSell
        } else if score <= -config.moderate_threshold {
            SignalLabel::Sell
        } else {
            SignalLabel::Neutral
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, SignalLabel::StrongBuy | SignalLabel::Buy)
    }

    pub fn is_short(&self) -> bool {
        matches!(self, SignalLabel::StrongSell | SignalLabel::Sell)
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalLabel::StrongBuy => "STRONG BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Neutral => "NEUTRAL",
            SignalLabel::Sell => "SELL",
            SignalLabel::StrongSell => "STRONG SELL",
        };
        f.write_str(name)
    }
}

/// Weekly regime read from the coarse timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendBias {
    StrongUp,
    Up,
    Down,
    StrongDown,
    /// Not enough weekly history for the long SMA.
    ShortHistory,
}

impl fmt::Display for TrendBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendBias::StrongUp => "strong uptrend",
            TrendBias::Up => "uptrend",
            TrendBias::Down => "downtrend",
            TrendBias::StrongDown => "strong downtrend",
            TrendBias::ShortHistory => "short history",
        };
        f.write_str(name)
    }
}

/// One scoring condition's outcome, kept for the factor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub contribution: f64,
    pub fired: bool,
}

/// The composite judgment: score, label, weekly bias, and which conditions fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub score: f64,
    pub label: SignalLabel,
    pub weekly: TrendBias,
    pub factors: Vec<Factor>,
}

/// Score the weekly snapshot: close vs long SMA sets direction, the mid SMA
/// confirming the regime upgrades it to "strong".
pub fn weekly_bias(snap: &IndicatorSnapshot, config: &ScoringConfig) -> (f64, TrendBias) {
    let sma_long = match snap.sma_long {
        Some(v) => v,
        None => return (0.0, TrendBias::ShortHistory),
    };

    if snap.close > sma_long {
        match snap.sma_mid {
            Some(mid) if mid > sma_long => (config.weekly_strong_weight, TrendBias::StrongUp),
            _ => (config.weekly_weight, TrendBias::Up),
        }
    } else {
        match snap.sma_mid {
            Some(mid) if mid < sma_long => (-config.weekly_strong_weight, TrendBias::StrongDown),
            _ => (-config.weekly_weight, TrendBias::Down),
        }
    }
}

/// Combine the daily snapshot (and optionally a weekly one) into a Signal.
pub fn score(
    daily: &IndicatorSnapshot,
    weekly: Option<&IndicatorSnapshot>,
    config: &ScoringConfig,
) -> Signal {
    let mut factors = Vec::new();
    let mut total = 0.0;

    let (weekly_score, weekly_trend) = match weekly {
        Some(snap) => weekly_bias(snap, config),
        None => (0.0, TrendBias::ShortHistory),
    };
    total += weekly_score;
    factors.push(Factor {
        name: "weekly trend".into(),
        contribution: weekly_score,
        fired: weekly_score != 0.0,
    });

    // MACD alignment: histogram sign and line-vs-signal must agree
    let macd_contribution = match (daily.macd_histogram, daily.macd, daily.macd_signal) {
        (Some(hist), Some(line), Some(sig)) if hist > 0.0 && line > sig => config.macd_weight,
        (Some(hist), Some(line), Some(sig)) if hist < 0.0 && line < sig => -config.macd_weight,
        _ => 0.0,
    };
    total += macd_contribution;
    factors.push(Factor {
        name: "macd alignment".into(),
        contribution: macd_contribution,
        fired: macd_contribution != 0.0,
    });

    // RSI in the neutral-bullish accumulation band
    let rsi_contribution = match daily.rsi {
        Some(rsi) if rsi >= config.rsi_band_low && rsi <= config.rsi_band_high => config.rsi_weight,
        _ => 0.0,
    };
    total += rsi_contribution;
    factors.push(Factor {
        name: "rsi neutral band".into(),
        contribution: rsi_contribution,
        fired: rsi_contribution != 0.0,
    });

    // Close above the short-term averages
    let ema_fast_contribution = match daily.ema_fast {
        Some(ema) if daily.close > ema => config.ema_fast_weight,
        _ => 0.0,
    };
    total += ema_fast_contribution;
    factors.push(Factor {
        name: "close above fast ema".into(),
        contribution: ema_fast_contribution,
        fired: ema_fast_contribution != 0.0,
    });

    let ema_mid_contribution = match daily.ema_mid {
        Some(ema) if daily.close > ema => config.ema_mid_weight,
        _ => 0.0,
    };
    total += ema_mid_contribution;
    factors.push(Factor {
        name: "close above mid ema".into(),
        contribution: ema_mid_contribution,
        fired: ema_mid_contribution != 0.0,
    });

    Signal {
        score: total,
        label: SignalLabel::from_score(total, config),
        weekly: weekly_trend,
        factors,
    }
}
