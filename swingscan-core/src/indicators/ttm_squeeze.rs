//! TTM Squeeze — volatility compression flag.
//!
//! The squeeze is "on" when both Bollinger bands sit inside the Keltner
//! channel (EMA midline +/- atr_mult * ATR over the same window), signalling
//! compressed volatility ahead of an expansion. Momentum is the close's
//! distance from the Donchian/SMA midpoint (a linear-regression-free proxy).
//!
//! `on`: 1.0 squeeze on, 0.0 off, NaN while either band set is warming up.

use super::atr::atr;
use super::bollinger::bollinger;
use super::ema::ema;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct SqueezeSeries {
    pub on: Vec<f64>,
    pub momentum: Vec<f64>,
}

pub fn ttm_squeeze(bars: &[Bar], window: usize, atr_mult: f64) -> SqueezeSeries {
    let n = bars.len();
    let mut on = vec![f64::NAN; n];
    let mut momentum = vec![f64::NAN; n];

    let bb = bollinger(bars, window, 2.0);
    let midline = ema(bars, window);
    let atr_series = atr(bars, window);

    for i in 0..n {
        if bb.upper[i].is_nan() || midline[i].is_nan() || atr_series[i].is_nan() {
            continue;
        }
        let kc_upper = midline[i] + atr_mult * atr_series[i];
        let kc_lower = midline[i] - atr_mult * atr_series[i];
        on[i] = if bb.upper[i] < kc_upper && bb.lower[i] > kc_lower {
            1.0
        } else {
            0.0
        };
    }

    if window >= 1 && n >= window {
        for i in (window - 1)..n {
            let slice = &bars[i + 1 - window..=i];
            if slice.iter().any(|b| b.high.is_nan() || b.low.is_nan()) || bb.middle[i].is_nan() {
                continue;
            }
            let hh = slice.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let ll = slice.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let midpoint = ((hh + ll) / 2.0 + bb.middle[i]) / 2.0;
            momentum[i] = bars[i].close - midpoint;
        }
    }

    SqueezeSeries { on, momentum }
}
