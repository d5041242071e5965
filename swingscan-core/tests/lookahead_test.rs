//! Look-ahead contamination tests for the whole indicator battery.
//!
//! Invariant: no indicator value at bar t may depend on price data from
//! bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200), then assert bars 0..100 are bit-identical between runs.
//! Any difference means future data is leaking into past values.

use chrono::NaiveDate;
use swingscan_core::domain::Bar;
use swingscan_core::indicators;

const FULL_LEN: usize = 200;
const TRUNCATED_LEN: usize = 100;

/// Deterministic pseudo-random walk using a simple LCG.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = price.max(10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;

        bars.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000 + (i as u64 * 100),
        });
    }

    bars
}

/// NaN-aware prefix equality: both NaN counts as equal.
fn assert_prefix_identical(name: &str, truncated: &[f64], full: &[f64]) {
    assert_eq!(truncated.len(), TRUNCATED_LEN, "{name}: truncated length mismatch");
    for i in 0..TRUNCATED_LEN {
        let (t, f) = (truncated[i], full[i]);
        let equal = (t.is_nan() && f.is_nan()) || t == f;
        assert!(equal, "{name}: value at index {i} changed when future bars were added ({t} vs {f})");
    }
}

fn check(name: &str, compute: impl Fn(&[Bar]) -> Vec<f64>) {
    let full = make_test_bars(FULL_LEN);
    let truncated = &full[..TRUNCATED_LEN];
    assert_prefix_identical(name, &compute(truncated), &compute(&full));
}

#[test]
fn ema_has_no_lookahead() {
    check("ema(9)", |bars| indicators::ema(bars, 9));
    check("ema(50)", |bars| indicators::ema(bars, 50));
}

#[test]
fn sma_has_no_lookahead() {
    check("sma(20)", |bars| indicators::sma(bars, 20));
    check("volume_sma(20)", |bars| indicators::volume_sma(bars, 20));
}

#[test]
fn rsi_has_no_lookahead() {
    check("rsi(14)", |bars| indicators::rsi(bars, 14));
}

#[test]
fn macd_has_no_lookahead() {
    check("macd.line", |bars| indicators::macd(bars, 12, 26, 9).line);
    check("macd.signal", |bars| indicators::macd(bars, 12, 26, 9).signal);
    check("macd.histogram", |bars| indicators::macd(bars, 12, 26, 9).histogram);
}

#[test]
fn bollinger_has_no_lookahead() {
    check("bollinger.upper", |bars| indicators::bollinger(bars, 20, 2.0).upper);
    check("bollinger.lower", |bars| indicators::bollinger(bars, 20, 2.0).lower);
}

#[test]
fn atr_has_no_lookahead() {
    check("atr(14)", |bars| indicators::atr(bars, 14));
}

#[test]
fn adx_has_no_lookahead() {
    check("adx(14)", |bars| indicators::adx(bars, 14));
}

#[test]
fn supertrend_has_no_lookahead() {
    check("supertrend.line", |bars| indicators::supertrend(bars, 10, 3.0).line);
    check("supertrend.direction", |bars| indicators::supertrend(bars, 10, 3.0).direction);
}

#[test]
fn stochastic_has_no_lookahead() {
    check("stochastic.k", |bars| indicators::stochastic(bars, 14, 3).k);
    check("stochastic.d", |bars| indicators::stochastic(bars, 14, 3).d);
}

#[test]
fn mfi_has_no_lookahead() {
    check("mfi(14)", |bars| indicators::mfi(bars, 14));
}

#[test]
fn williams_r_has_no_lookahead() {
    check("williams_r(14)", |bars| indicators::williams_r(bars, 14));
}

#[test]
fn ttm_squeeze_has_no_lookahead() {
    check("squeeze.on", |bars| indicators::ttm_squeeze(bars, 20, 1.5).on);
    check("squeeze.momentum", |bars| indicators::ttm_squeeze(bars, 20, 1.5).momentum);
}
