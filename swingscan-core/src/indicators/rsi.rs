//! Relative Strength Index (RSI).
//!
//! Rolling-mean form: avg_gain and avg_loss are plain trailing means of the
//! up/down moves over the window (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge cases: avg_loss == 0 -> 100; avg_gain == 0 -> 0; both zero -> 50.

use crate::domain::Bar;

pub fn rsi(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // Per-bar up/down moves; index 0 has no prior close
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = bars[i].close - bars[i - 1].close;
        if delta.is_nan() {
            continue;
        }
        gains[i] = if delta > 0.0 { delta } else { 0.0 };
        losses[i] = if delta < 0.0 { -delta } else { 0.0 };
    }

    for i in period..n {
        let gain_window = &gains[i + 1 - period..=i];
        let loss_window = &losses[i + 1 - period..=i];
        if gain_window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let avg_gain = gain_window.iter().sum::<f64>() / period as f64;
        let avg_loss = loss_window.iter().sum::<f64>() / period as f64;
        result[i] = rsi_value(avg_gain, avg_loss);
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains_is_100() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_is_50() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 50.0, 1e-6);
    }

    #[test]
    fn rsi_known_mixed_value() {
        // Changes: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) ~= 31.7757
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61]);
        let result = rsi(&bars, 3);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = rsi(&bars, 3);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_warmup_is_nan() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0]);
        let result = rsi(&bars, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
    }

    #[test]
    fn rsi_short_series_all_nan() {
        let bars = make_bars(&[100.0, 101.0]);
        let result = rsi(&bars, 14);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
