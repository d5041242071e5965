//! Supertrend — ATR-based directional overlay.
//!
//! Inherently sequential/stateful: direction flips between support and
//! resistance based on close vs band comparisons. Bands ratchet — the upper
//! band can only tighten downward, the lower band upward, while price stays
//! on the respective side.
//!
//! Outputs the active band (lower band when trending up, upper when trending
//! down) plus a discrete direction series (+1 up, -1 down, NaN warmup).

use super::atr::atr;
use crate::domain::Bar;

/// Active band line and +1/-1 direction flags, time-aligned with the input.
#[derive(Debug, Clone)]
pub struct SupertrendSeries {
    pub line: Vec<f64>,
    pub direction: Vec<f64>,
}

pub fn supertrend(bars: &[Bar], period: usize, multiplier: f64) -> SupertrendSeries {
    let n = bars.len();
    let mut line = vec![f64::NAN; n];
    let mut direction = vec![f64::NAN; n];

    let atr_series = atr(bars, period);

    let start = match atr_series.iter().position(|v| !v.is_nan()) {
        Some(idx) => idx,
        None => {
            return SupertrendSeries { line, direction };
        }
    };

    let hl2 = (bars[start].high + bars[start].low) / 2.0;
    let mut upper_band = hl2 + multiplier * atr_series[start];
    let mut lower_band = hl2 - multiplier * atr_series[start];
    let mut trending_up = true;
    line[start] = lower_band;
    direction[start] = 1.0;

    for i in (start + 1)..n {
        if atr_series[i].is_nan()
            || bars[i].close.is_nan()
            || bars[i].high.is_nan()
            || bars[i].low.is_nan()
        {
            continue;
        }

        let hl2 = (bars[i].high + bars[i].low) / 2.0;
        let basic_upper = hl2 + multiplier * atr_series[i];
        let basic_lower = hl2 - multiplier * atr_series[i];

        let prev_close = bars[i - 1].close;
        // Upper band: can only decrease while price stays below it
        upper_band = if !prev_close.is_nan() && prev_close <= upper_band {
            basic_upper.min(upper_band)
        } else {
            basic_upper
        };
        // Lower band: can only increase while price stays above it
        lower_band = if !prev_close.is_nan() && prev_close >= lower_band {
            basic_lower.max(lower_band)
        } else {
            basic_lower
        };

        if trending_up && bars[i].close < lower_band {
            trending_up = false;
        } else if !trending_up && bars[i].close > upper_band {
            trending_up = true;
        }

        line[i] = if trending_up { lower_band } else { upper_band };
        direction[i] = if trending_up { 1.0 } else { -1.0 };
    }

    SupertrendSeries { line, direction }
}
