//! Moving Average Convergence Divergence (MACD).
//!
//! Line = EMA(fast) - EMA(slow); signal = EMA(line, signal_span);
//! histogram = line - signal. All three share the EMA's seed-from-first
//! convention, so the series is defined from index 0.

use super::ema::{ema, ema_of_series};
use crate::domain::Bar;

/// The three MACD output series, time-aligned with the input bars.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = ema(bars, fast);
    let slow_ema = ema(bars, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_of_series(&line, signal_span);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
