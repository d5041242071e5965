//! Williams %R — bounded momentum oscillator.
//!
//! %R = -100 * (HH - close) / (HH - LL) over the trailing window.
//! Bounded [-100, 0]; a flat window yields NaN.

use crate::domain::Bar;

pub fn williams_r(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        if window.iter().any(|b| b.high.is_nan() || b.low.is_nan()) || bars[i].close.is_nan() {
            continue;
        }
        let hh = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let ll = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        if hh == ll {
            continue;
        }
        result[i] = -100.0 * (hh - bars[i].close) / (hh - ll);
    }

    result
}
