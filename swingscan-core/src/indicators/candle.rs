//! Candle-shape classifier.
//!
//! Classifies the latest bar (and, for engulfing patterns, the prior one)
//! by body-to-range and wick proportions:
//! - body/range < 0.1 -> Doji
//! - body/range > 0.85 -> Marubozu (bullish or bearish by close vs open)
//! - lower wick > 0.6, upper wick < 0.15, body < 0.35 -> Hammer / HangingMan
//! - upper wick > 0.6, lower wick < 0.15, body < 0.35 -> InvertedHammer / ShootingStar
//! - current body engulfs the prior opposite-color body -> engulfing pair
//! Zero range (high == low) -> Indefinite, never a division fault.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use std::fmt;

const DOJI_BODY_RATIO: f64 = 0.1;
const MARUBOZU_BODY_RATIO: f64 = 0.85;
const HAMMER_WICK_RATIO: f64 = 0.6;
const HAMMER_OPPOSITE_WICK_RATIO: f64 = 0.15;
const HAMMER_BODY_RATIO: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandlePattern {
    Doji,
    MarubozuBullish,
    MarubozuBearish,
    Hammer,
    HangingMan,
    InvertedHammer,
    ShootingStar,
    BullishEngulfing,
    BearishEngulfing,
    Neutral,
    /// Zero-range bar (high == low); shape ratios are undefined.
    Indefinite,
}

impl fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CandlePattern::Doji => "Doji",
            CandlePattern::MarubozuBullish => "Marubozu Bullish",
            CandlePattern::MarubozuBearish => "Marubozu Bearish",
            CandlePattern::Hammer => "Hammer",
            CandlePattern::HangingMan => "Hanging Man",
            CandlePattern::InvertedHammer => "Inverted Hammer",
            CandlePattern::ShootingStar => "Shooting Star",
            CandlePattern::BullishEngulfing => "Bullish Engulfing",
            CandlePattern::BearishEngulfing => "Bearish Engulfing",
            CandlePattern::Neutral => "Neutral",
            CandlePattern::Indefinite => "Indefinite",
        };
        f.write_str(name)
    }
}

/// Classify the latest candle. `prev` enables the two-bar engulfing checks.
pub fn classify(prev: Option<&Bar>, last: &Bar) -> CandlePattern {
    let range = last.range();
    if range <= 0.0 || range.is_nan() {
        return CandlePattern::Indefinite;
    }

    let body_ratio = last.body() / range;
    let upper_wick = (last.high - last.open.max(last.close)) / range;
    let lower_wick = (last.open.min(last.close) - last.low) / range;

    if body_ratio < DOJI_BODY_RATIO {
        return CandlePattern::Doji;
    }

    if body_ratio > MARUBOZU_BODY_RATIO {
        return if last.is_bullish() {
            CandlePattern::MarubozuBullish
        } else {
            CandlePattern::MarubozuBearish
        };
    }

    if lower_wick > HAMMER_WICK_RATIO
        && upper_wick < HAMMER_OPPOSITE_WICK_RATIO
        && body_ratio < HAMMER_BODY_RATIO
    {
        return if last.is_bullish() {
            CandlePattern::Hammer
        } else {
            CandlePattern::HangingMan
        };
    }

    if upper_wick > HAMMER_WICK_RATIO
        && lower_wick < HAMMER_OPPOSITE_WICK_RATIO
        && body_ratio < HAMMER_BODY_RATIO
    {
        return if last.is_bullish() {
            CandlePattern::InvertedHammer
        } else {
            CandlePattern::ShootingStar
        };
    }

    if let Some(prev) = prev {
        if last.is_bullish()
            && prev.close < prev.open
            && last.open <= prev.close
            && last.close >= prev.open
        {
            return CandlePattern::BullishEngulfing;
        }
        if !last.is_bullish()
            && prev.close > prev.open
            && last.open >= prev.close
            && last.close <= prev.open
        {
            return CandlePattern::BearishEngulfing;
        }
    }

    CandlePattern::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn zero_range_is_indefinite() {
        let b = bar(100.0, 100.0, 100.0, 100.0);
        assert_eq!(classify(None, &b), CandlePattern::Indefinite);
    }

    #[test]
    fn tiny_body_is_doji() {
        // Body 0.2 over a range of 10 -> ratio 0.02
        let b = bar(100.0, 105.0, 95.0, 100.2);
        assert_eq!(classify(None, &b), CandlePattern::Doji);
    }

    #[test]
    fn full_body_is_marubozu() {
        let bullish = bar(100.0, 110.0, 99.9, 109.9);
        assert_eq!(classify(None, &bullish), CandlePattern::MarubozuBullish);
        let bearish = bar(109.9, 110.0, 99.9, 100.0);
        assert_eq!(classify(None, &bearish), CandlePattern::MarubozuBearish);
    }

    #[test]
    fn long_lower_wick_is_hammer_family() {
        // Range 10, lower wick 7, body 2, upper wick 1
        let bullish = bar(107.0, 110.0, 100.0, 109.0);
        assert_eq!(classify(None, &bullish), CandlePattern::Hammer);
        let bearish = bar(109.0, 110.0, 100.0, 107.0);
        assert_eq!(classify(None, &bearish), CandlePattern::HangingMan);
    }

    #[test]
    fn long_upper_wick_is_inverted_family() {
        // Range 10, upper wick 7, body 2, lower wick 1
        let bullish = bar(101.0, 110.0, 100.0, 103.0);
        assert_eq!(classify(None, &bullish), CandlePattern::InvertedHammer);
        let bearish = bar(103.0, 110.0, 100.0, 101.0);
        assert_eq!(classify(None, &bearish), CandlePattern::ShootingStar);
    }

    #[test]
    fn engulfing_needs_prior_bar() {
        // Prior bearish body 104->101; current bullish body 100->105 engulfs it
        let prev = bar(104.0, 105.0, 100.5, 101.0);
        let last = bar(100.0, 106.0, 99.0, 105.0);
        assert_eq!(classify(Some(&prev), &last), CandlePattern::BullishEngulfing);
        assert_eq!(classify(None, &last), CandlePattern::Neutral);
    }

    #[test]
    fn bearish_engulfing() {
        let prev = bar(101.0, 105.0, 100.5, 104.0);
        let last = bar(105.0, 106.0, 99.0, 100.0);
        assert_eq!(classify(Some(&prev), &last), CandlePattern::BearishEngulfing);
    }

    #[test]
    fn balanced_bar_is_neutral() {
        // Body ~0.4 of range with moderate wicks on both sides
        let b = bar(102.0, 106.0, 98.0, 105.0);
        assert_eq!(classify(None, &b), CandlePattern::Neutral);
    }
}
