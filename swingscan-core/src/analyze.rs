//! Single-symbol pipeline: fetch, compute, score, size.
//!
//! The weekly timeframe is fetched directly (five years of weekly bars give
//! the long SMA far more history than a resample of one year of dailies);
//! if that fetch fails the daily series is resampled instead, so a weekly
//! outage never blocks the analysis.

use crate::data::{BarCache, DataError, DataProvider};
use crate::domain::Interval;
use crate::frame::{IndicatorConfig, IndicatorFrame};
use crate::report::{Analysis, DEFAULT_TAIL};
use crate::risk::{self, Direction, RiskConfig};
use crate::score::{self, ScoringConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest daily bars the pipeline will score. Below this even the fast EMAs
/// are too noisy to act on.
pub const MIN_DAILY_BARS: usize = 30;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("insufficient history for {symbol}: {have} bars, need {need}")]
    InsufficientHistory {
        symbol: String,
        have: usize,
        need: usize,
    },
}

/// All pipeline knobs in one place, loadable from a single TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub indicators: IndicatorConfig,
    pub scoring: ScoringConfig,
    pub risk: RiskConfig,
    pub tail: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            scoring: ScoringConfig::default(),
            risk: RiskConfig::default(),
            tail: DEFAULT_TAIL,
        }
    }
}

impl AnalyzeConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Run the full pipeline for one symbol.
pub fn analyze(
    provider: &dyn DataProvider,
    cache: &BarCache,
    symbol: &str,
    config: &AnalyzeConfig,
) -> Result<Analysis, AnalysisError> {
    let daily = cache.get_or_fetch(provider, symbol, Interval::Daily)?;
    if daily.len() < MIN_DAILY_BARS {
        return Err(AnalysisError::InsufficientHistory {
            symbol: symbol.to_string(),
            have: daily.len(),
            need: MIN_DAILY_BARS,
        });
    }

    // Weekly is best-effort: fall back to resampling the dailies
    let weekly = cache
        .get_or_fetch(provider, symbol, Interval::Weekly)
        .unwrap_or_else(|_| daily.resample_weekly());

    let weekly_frame = IndicatorFrame::compute(weekly, &config.indicators);
    let weekly_snap = weekly_frame.snapshot();

    let daily_frame = IndicatorFrame::compute(daily, &config.indicators);
    let snapshot = daily_frame
        .snapshot()
        .ok_or_else(|| AnalysisError::InsufficientHistory {
            symbol: symbol.to_string(),
            have: 0,
            need: MIN_DAILY_BARS,
        })?;

    let signal = score::score(&snapshot, weekly_snap.as_ref(), &config.scoring);

    let direction = if signal.label.is_long() {
        Some(Direction::Long)
    } else if signal.label.is_short() {
        Some(Direction::Short)
    } else {
        None
    };
    let plan = match (direction, snapshot.atr) {
        (Some(dir), Some(atr)) => Some(risk::plan(snapshot.close, dir, atr, &config.risk)),
        _ => None,
    };

    Ok(Analysis {
        symbol: symbol.to_string(),
        signal,
        plan,
        snapshot,
        tail: daily_frame.series.tail(config.tail).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SyntheticProvider;
    use crate::domain::{Bar, BarSeries};
    use chrono::NaiveDate;

    struct ShortHistoryProvider;

    impl DataProvider for ShortHistoryProvider {
        fn name(&self) -> &str {
            "short"
        }

        fn fetch(&self, symbol: &str, interval: Interval) -> Result<BarSeries, DataError> {
            let bars = (0..5)
                .map(|i| Bar {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
                        + chrono::Duration::days(i),
                    open: 100.0,
                    high: 101.0,
                    low: 99.0,
                    close: 100.5,
                    volume: 1000,
                })
                .collect();
            Ok(BarSeries::new(symbol, interval, bars))
        }
    }

    struct FailingProvider;

    impl DataProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self, symbol: &str, _interval: Interval) -> Result<BarSeries, DataError> {
            Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
        }
    }

    #[test]
    fn analyze_produces_full_output_contract() {
        let provider = SyntheticProvider::new(11);
        let cache = BarCache::default();
        let analysis = analyze(&provider, &cache, "SPY", &AnalyzeConfig::default()).unwrap();

        assert_eq!(analysis.symbol, "SPY");
        assert!(!analysis.tail.is_empty());
        assert!(analysis.tail.len() <= DEFAULT_TAIL);
        assert!(analysis.snapshot.rsi.is_some());
        assert!(analysis.snapshot.atr.is_some());
        // Non-neutral signals carry a plan, neutral ones never do
        match analysis.plan {
            Some(_) => assert!(
                analysis.signal.label.is_long() || analysis.signal.label.is_short()
            ),
            None => assert!(!analysis.signal.label.is_long() && !analysis.signal.label.is_short()),
        }
    }

    #[test]
    fn analyze_rejects_short_history() {
        let cache = BarCache::default();
        let err = analyze(&ShortHistoryProvider, &cache, "SPY", &AnalyzeConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientHistory { have: 5, need, .. } if need == MIN_DAILY_BARS
        ));
    }

    #[test]
    fn analyze_propagates_fetch_failure() {
        let cache = BarCache::default();
        let err = analyze(&FailingProvider, &cache, "NOPE", &AnalyzeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Data(DataError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn analyze_hits_cache_on_second_run() {
        let provider = SyntheticProvider::new(11);
        let cache = BarCache::default();
        analyze(&provider, &cache, "SPY", &AnalyzeConfig::default()).unwrap();
        assert_eq!(cache.len(), 2); // daily + weekly
        analyze(&provider, &cache, "SPY", &AnalyzeConfig::default()).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn config_loads_from_toml_with_partial_override() {
        let config = AnalyzeConfig::from_toml(
            r#"
            tail = 90

            [risk]
            capital = 25000.0

            [scoring]
            macd_weight = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.tail, 90);
        assert_eq!(config.risk.capital, 25000.0);
        assert_eq!(config.scoring.macd_weight, 2.0);
        assert_eq!(config.indicators.rsi_period, 14);
    }
}
