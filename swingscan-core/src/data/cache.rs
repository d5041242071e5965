//! In-memory bar cache with a time-to-live bound.
//!
//! Keyed by (symbol, interval). Replaces ambient fetch-memoization with an
//! explicit object: a scanner pass over a few hundred tickers hits the
//! network once per symbol per interval, and a re-run within the TTL hits
//! the cache. Entries expire, they are never invalidated by hand.

use super::provider::{DataError, DataProvider};
use crate::domain::{BarSeries, Interval};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default TTL: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct Entry {
    fetched_at: Instant,
    series: BarSeries,
}

/// Keyed, TTL-bound cache of fetched bar series. Interior mutability so a
/// shared reference can be used from the parallel scanner.
pub struct BarCache {
    ttl: Duration,
    entries: Mutex<HashMap<(String, Interval), Entry>>,
}

impl Default for BarCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl BarCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh cached series for the key, if any.
    pub fn get(&self, symbol: &str, interval: Interval) -> Option<BarSeries> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(&(symbol.to_string(), interval))?;
        if entry.fetched_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.series.clone())
    }

    pub fn put(&self, series: BarSeries) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            (series.symbol.clone(), series.interval),
            Entry {
                fetched_at: Instant::now(),
                series,
            },
        );
    }

    /// Cache-first fetch: consult the cache, fall through to the provider,
    /// store the result on success.
    pub fn get_or_fetch(
        &self,
        provider: &dyn DataProvider,
        symbol: &str,
        interval: Interval,
    ) -> Result<BarSeries, DataError> {
        if let Some(series) = self.get(symbol, interval) {
            return Ok(series);
        }
        let series = provider.fetch(symbol, interval)?;
        self.put(series.clone());
        Ok(series)
    }

    /// Number of entries, fresh or expired.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries.
    pub fn evict_expired(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.retain(|_, e| e.fetched_at.elapsed() <= self.ttl);
    }
}
