//! Bollinger Bands — rolling mean +/- standard deviation multiplier.
//!
//! Uses sample stddev (divide by N-1), matching the pandas rolling std the
//! scoring thresholds were tuned against. Lookback: window - 1.

use super::sma::sma_of_series;
use crate::domain::Bar;

/// Middle/upper/lower band series, time-aligned with the input bars.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(bars: &[Bar], window: usize, k: f64) -> BollingerSeries {
    let n = bars.len();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = sma_of_series(&closes, window);
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    if window >= 2 && n >= window {
        for i in (window - 1)..n {
            let mean = middle[i];
            if mean.is_nan() {
                continue;
            }
            let slice = &closes[i + 1 - window..=i];
            let variance = slice
                .iter()
                .map(|c| {
                    let d = c - mean;
                    d * d
                })
                .sum::<f64>()
                / (window - 1) as f64;
            let stddev = variance.sqrt();
            upper[i] = mean + k * stddev;
            lower[i] = mean - k * stddev;
        }
    }

    BollingerSeries {
        middle,
        upper,
        lower,
    }
}
