//! Synthetic data provider — seeded random-walk bars.
//!
//! Deterministic for a given (seed, symbol, interval), so offline runs and
//! tests see stable data. The per-symbol seed is derived by hashing, not by
//! call order, so parallel scans reproduce too.

use super::provider::{DataError, DataProvider};
use crate::domain::{Bar, BarSeries, Interval};
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::{Hash, Hasher};

/// Deterministic random-walk bar source.
pub struct SyntheticProvider {
    seed: u64,
    start_price: f64,
    /// Daily per-bar drift as a fraction (e.g. 0.0005 = +5 bps/day).
    drift: f64,
    /// Daily per-bar volatility as a fraction of price.
    volatility: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(42)
    }
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_price: 100.0,
            drift: 0.0003,
            volatility: 0.015,
        }
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Per-(symbol, interval) seed, independent of call order.
    fn sub_seed(&self, symbol: &str, interval: Interval) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.seed.hash(&mut hasher);
        symbol.hash(&mut hasher);
        interval.api_name().hash(&mut hasher);
        hasher.finish()
    }

    fn generate(&self, symbol: &str, interval: Interval) -> Vec<Bar> {
        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol, interval));

        // Roughly a year of daily bars, five years of weekly
        let (count, step_days, scale) = match interval {
            Interval::Daily => (260, 1i64, 1.0),
            Interval::Weekly => (260, 7i64, 5.0f64.sqrt()),
        };
        let drift = self.drift * scale * scale;
        let volatility = self.volatility * scale;

        let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid anchor date");
        let mut close = self.start_price;
        let mut bars = Vec::with_capacity(count);

        for _ in 0..count {
            let open = close;
            let change = drift + volatility * rng.gen_range(-1.0..1.0);
            close = (open * (1.0 + change)).max(0.01);
            let wiggle = volatility * 0.5;
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..wiggle));
            let low = (open.min(close) * (1.0 - rng.gen_range(0.0..wiggle))).max(0.01);
            let volume = rng.gen_range(500_000..5_000_000);

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });

            date += ChronoDuration::days(step_days);
            // Daily bars skip weekends
            if step_days == 1 {
                while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                    date += ChronoDuration::days(1);
                }
            }
        }

        bars
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<BarSeries, DataError> {
        Ok(BarSeries::new(symbol, interval, self.generate(symbol, interval)))
    }
}
