//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance,
//! synthetic bars) so implementations can be swapped and mocked for tests.
//! "Symbol has no data" and "fetch failed" are both DataError variants the
//! caller handles identically: skip and report, never crash.

use crate::domain::{BarSeries, Interval};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("empty result for {symbol}: no bars in range")]
    EmptyResult { symbol: String },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market data sources.
///
/// The cache layer sits above this trait — providers don't know about it.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLCV bars for a symbol at the given interval. The fetch range
    /// is interval-defined (roughly a year of daily bars, five of weekly).
    fn fetch(&self, symbol: &str, interval: Interval) -> Result<BarSeries, DataError>;
}
