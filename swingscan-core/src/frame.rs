//! IndicatorFrame — a bar series extended with derived columns.
//!
//! Columns are named, typed fields decided at computation time; the scoring
//! path never guesses column names. Every column is time-aligned with the
//! source bars and uses NaN for warmup/unavailable positions, so value i
//! depends only on bars[0..=i].

use crate::domain::{Bar, BarSeries};
use crate::indicators::{
    self, CandlePattern, MacdSeries, SqueezeSeries, StochasticSeries, SupertrendSeries,
};
use serde::{Deserialize, Serialize};

/// Window lengths and multipliers for the indicator battery.
///
/// All values are design parameters, overridable from TOML; the defaults are
/// the conventional settings the scoring weights were tuned against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub sma_mid: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
    pub atr_period: usize,
    pub adx_period: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub mfi_period: usize,
    pub williams_period: usize,
    pub squeeze_window: usize,
    pub squeeze_atr_mult: f64,
    pub volume_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_mid: 20,
            ema_slow: 50,
            sma_mid: 50,
            sma_long: 200,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_k: 2.0,
            atr_period: 14,
            adx_period: 14,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            stochastic_k: 14,
            stochastic_d: 3,
            mfi_period: 14,
            williams_period: 14,
            squeeze_window: 20,
            squeeze_atr_mult: 1.5,
            volume_window: 20,
        }
    }
}

/// A bar series plus every derived column, computed in one pass.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub series: BarSeries,
    pub ema_fast: Vec<f64>,
    pub ema_mid: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub sma_mid: Vec<f64>,
    pub sma_long: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: MacdSeries,
    pub bollinger: indicators::BollingerSeries,
    pub atr: Vec<f64>,
    pub adx: Vec<f64>,
    pub supertrend: SupertrendSeries,
    pub stochastic: StochasticSeries,
    pub mfi: Vec<f64>,
    pub williams_r: Vec<f64>,
    pub squeeze: SqueezeSeries,
    pub volume_avg: Vec<f64>,
}

impl IndicatorFrame {
    /// Run the full indicator battery over a series. Never fails: a series
    /// shorter than any window simply leaves that column NaN.
    pub fn compute(series: BarSeries, config: &IndicatorConfig) -> Self {
        let bars = series.bars();
        Self {
            ema_fast: indicators::ema(bars, config.ema_fast),
            ema_mid: indicators::ema(bars, config.ema_mid),
            ema_slow: indicators::ema(bars, config.ema_slow),
            sma_mid: indicators::sma(bars, config.sma_mid),
            sma_long: indicators::sma(bars, config.sma_long),
            rsi: indicators::rsi(bars, config.rsi_period),
            macd: indicators::macd(bars, config.macd_fast, config.macd_slow, config.macd_signal),
            bollinger: indicators::bollinger(bars, config.bollinger_window, config.bollinger_k),
            atr: indicators::atr(bars, config.atr_period),
            adx: indicators::adx(bars, config.adx_period),
            supertrend: indicators::supertrend(
                bars,
                config.supertrend_period,
                config.supertrend_multiplier,
            ),
            stochastic: indicators::stochastic(bars, config.stochastic_k, config.stochastic_d),
            mfi: indicators::mfi(bars, config.mfi_period),
            williams_r: indicators::williams_r(bars, config.williams_period),
            squeeze: indicators::ttm_squeeze(bars, config.squeeze_window, config.squeeze_atr_mult),
            volume_avg: indicators::volume_sma(bars, config.volume_window),
            series,
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Point-in-time view of the latest row. None when the series is empty.
    pub fn snapshot(&self) -> Option<IndicatorSnapshot> {
        let bars = self.series.bars();
        let last = bars.last()?;
        let i = bars.len() - 1;
        let prev = if i > 0 { Some(&bars[i - 1]) } else { None };

        Some(IndicatorSnapshot {
            close: last.close,
            ema_fast: at(&self.ema_fast, i),
            ema_mid: at(&self.ema_mid, i),
            ema_slow: at(&self.ema_slow, i),
            sma_mid: at(&self.sma_mid, i),
            sma_long: at(&self.sma_long, i),
            rsi: at(&self.rsi, i),
            macd: at(&self.macd.line, i),
            macd_signal: at(&self.macd.signal, i),
            macd_histogram: at(&self.macd.histogram, i),
            bollinger_upper: at(&self.bollinger.upper, i),
            bollinger_lower: at(&self.bollinger.lower, i),
            atr: at(&self.atr, i),
            adx: at(&self.adx, i),
            supertrend_direction: at(&self.supertrend.direction, i),
            stochastic_k: at(&self.stochastic.k, i),
            stochastic_d: at(&self.stochastic.d, i),
            mfi: at(&self.mfi, i),
            williams_r: at(&self.williams_r, i),
            squeeze_on: at(&self.squeeze.on, i),
            volume: last.volume,
            volume_avg: at(&self.volume_avg, i),
            candle: indicators::classify(prev, last),
        })
    }
}

/// NaN-aware positional lookup: NaN (unavailable) becomes None.
fn at(series: &[f64], i: usize) -> Option<f64> {
    series.get(i).copied().filter(|v| !v.is_nan())
}

/// The latest row of an IndicatorFrame. Every field that needs warmup is an
/// Option: None means "not available", which scoring treats as a zero
/// contribution, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub ema_fast: Option<f64>,
    pub ema_mid: Option<f64>,
    pub ema_slow: Option<f64>,
    pub sma_mid: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub atr: Option<f64>,
    pub adx: Option<f64>,
    pub supertrend_direction: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
    pub mfi: Option<f64>,
    pub williams_r: Option<f64>,
    pub squeeze_on: Option<f64>,
    pub volume: u64,
    pub volume_avg: Option<f64>,
    pub candle: CandlePattern,
}
