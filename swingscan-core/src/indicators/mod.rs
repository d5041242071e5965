//! Concrete indicator implementations.
//!
//! Indicators are pure functions: bar history in, numeric series out. Every
//! output series has the same length as the input and uses `f64::NAN` for
//! warmup/unavailable positions. No value at index i may depend on bars
//! after i (no look-ahead), and no indicator ever fails on short input —
//! it degrades to NaN.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod candle;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod ttm_squeeze;
pub mod williams_r;

pub use adx::adx;
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, BollingerSeries};
pub use candle::{classify, CandlePattern};
pub use ema::{ema, ema_of_series};
pub use macd::{macd, MacdSeries};
pub use mfi::mfi;
pub use rsi::rsi;
pub use sma::{sma, sma_of_series, volume_sma};
pub use stochastic::{stochastic, StochasticSeries};
pub use supertrend::{supertrend, SupertrendSeries};
pub use ttm_squeeze::{ttm_squeeze, SqueezeSeries};
pub use williams_r::williams_r;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
