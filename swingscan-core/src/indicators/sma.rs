//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing window. NaN until `window - 1`.

use crate::domain::Bar;

/// SMA of the close series.
pub fn sma(bars: &[Bar], window: usize) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    sma_of_series(&closes, window)
}

/// SMA of the volume series (for the volume-confirmation condition).
pub fn volume_sma(bars: &[Bar], window: usize) -> Vec<f64> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    sma_of_series(&volumes, window)
}

/// SMA of an arbitrary series. A window containing NaN yields NaN.
pub fn sma_of_series(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = slice.iter().sum::<f64>() / window as f64;
    }

    result
}
