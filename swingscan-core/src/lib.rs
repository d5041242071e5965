//! swingscan core — indicator battery, confluence scoring, risk sizing,
//! data layer, and batch scanner.
//!
//! The pipeline is BarSeries -> IndicatorFrame -> Signal -> RiskPlan:
//! - Domain types (OHLCV bars, cleaned time-ascending series)
//! - Pure indicator functions (NaN = unavailable, no look-ahead)
//! - Weighted confluence score with a discrete label
//! - Fixed-fraction position sizing and DCA averaging
//! - Provider trait + Yahoo Finance client + TTL cache + scan universe
//! - Failure-isolated scanner and journal summary export

pub mod analyze;
pub mod data;
pub mod domain;
pub mod frame;
pub mod indicators;
pub mod report;
pub mod risk;
pub mod scan;
pub mod score;
