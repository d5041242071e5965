//! Stochastic oscillator (%K / %D).
//!
//! %K = 100 * (close - LL) / (HH - LL) over the trailing k window;
//! %D = SMA(%K, d). A flat window (HH == LL) yields NaN, never a division
//! fault. Both bounded [0, 100].

use super::sma::sma_of_series;
use crate::domain::Bar;

/// %K and %D series, time-aligned with the input bars.
#[derive(Debug, Clone)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn stochastic(bars: &[Bar], k_period: usize, d_period: usize) -> StochasticSeries {
    let n = bars.len();
    let mut k = vec![f64::NAN; n];

    if k_period >= 1 && n >= k_period {
        for i in (k_period - 1)..n {
            let window = &bars[i + 1 - k_period..=i];
            if window.iter().any(|b| b.high.is_nan() || b.low.is_nan()) || bars[i].close.is_nan() {
                continue;
            }
            let hh = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let ll = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            if hh == ll {
                continue; // flat window, %K undefined
            }
            k[i] = 100.0 * (bars[i].close - ll) / (hh - ll);
        }
    }

    let d = sma_of_series(&k, d_period);
    StochasticSeries { k, d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn k_at_window_high_is_100() {
        let bars = make_ohlc_bars(&[
            (100.0, 102.0, 98.0, 100.0),
            (100.0, 104.0, 99.0, 101.0),
            (101.0, 106.0, 100.0, 106.0), // close at the window high
        ]);
        let st = stochastic(&bars, 3, 3);
        assert_approx(st.k[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn k_at_window_low_is_0() {
        let bars = make_ohlc_bars(&[
            (100.0, 102.0, 98.0, 100.0),
            (100.0, 104.0, 99.0, 101.0),
            (101.0, 103.0, 95.0, 95.0), // close at the window low
        ]);
        let st = stochastic(&bars, 3, 3);
        assert_approx(st.k[2], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn k_bounds() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
        ]);
        let st = stochastic(&bars, 3, 2);
        for &v in st.k.iter().chain(&st.d) {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v));
            }
        }
    }

    #[test]
    fn flat_window_is_nan() {
        let bars = make_ohlc_bars(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0),
        ]);
        let st = stochastic(&bars, 3, 3);
        assert!(st.k[2].is_nan());
    }

    #[test]
    fn d_is_sma_of_k() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
        ]);
        let st = stochastic(&bars, 2, 2);
        for i in 2..5 {
            if !st.k[i].is_nan() && !st.k[i - 1].is_nan() {
                assert_approx(st.d[i], (st.k[i] + st.k[i - 1]) / 2.0, DEFAULT_EPSILON);
            }
        }
    }
}
