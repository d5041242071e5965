//! Money Flow Index (MFI) — volume-weighted momentum oscillator.
//!
//! Typical price = (high + low + close) / 3; raw money flow = tp * volume.
//! Flow is positive when tp rises, negative when it falls, excluded when
//! unchanged. MFI = 100 - 100 / (1 + pos_flow / neg_flow) over the window.
//! Edge cases mirror RSI: neg == 0 -> 100, pos == 0 -> 0, both zero -> 50.
//! Bounded [0, 100]. Lookback: period.

use crate::domain::Bar;

pub fn mfi(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let tp: Vec<f64> = bars
        .iter()
        .map(|b| (b.high + b.low + b.close) / 3.0)
        .collect();

    // Signed flow per bar; index 0 has no prior typical price
    let mut pos_flow = vec![f64::NAN; n];
    let mut neg_flow = vec![f64::NAN; n];
    for i in 1..n {
        if tp[i].is_nan() || tp[i - 1].is_nan() {
            continue;
        }
        let raw = tp[i] * bars[i].volume as f64;
        if tp[i] > tp[i - 1] {
            pos_flow[i] = raw;
            neg_flow[i] = 0.0;
        } else if tp[i] < tp[i - 1] {
            pos_flow[i] = 0.0;
            neg_flow[i] = raw;
        } else {
            pos_flow[i] = 0.0;
            neg_flow[i] = 0.0;
        }
    }

    for i in period..n {
        let pos_window = &pos_flow[i + 1 - period..=i];
        let neg_window = &neg_flow[i + 1 - period..=i];
        if pos_window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let pos: f64 = pos_window.iter().sum();
        let neg: f64 = neg_window.iter().sum();

        result[i] = if neg == 0.0 && pos == 0.0 {
            50.0
        } else if neg == 0.0 {
            100.0
        } else if pos == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + pos / neg)
        };
    }

    result
}
