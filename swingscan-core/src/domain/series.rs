//! BarSeries — an ordered, cleaned sequence of bars for one symbol.
//!
//! Construction canonicalizes the raw bars: sort ascending by date, dedupe
//! (first occurrence wins), drop all-NaN rows, forward-fill interior gaps
//! from the prior valid bar. Leading bars that cannot be filled are dropped.

use super::bar::Bar;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Bar aggregation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Daily,
    Weekly,
}

impl Interval {
    /// Wire name used by the chart API (`1d` / `1wk`).
    pub fn api_name(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
        }
    }

    /// Default fetch range for this interval (`1y` daily, `5y` weekly).
    pub fn default_range(&self) -> &'static str {
        match self {
            Interval::Daily => "1y",
            Interval::Weekly => "5y",
        }
    }
}

/// Time-ascending OHLCV series for one symbol, unique dates, gaps filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: String,
    pub interval: Interval,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from raw bars, canonicalizing on the way in.
    pub fn new(symbol: impl Into<String>, interval: Interval, mut raw: Vec<Bar>) -> Self {
        raw.retain(|b| !b.is_void());
        raw.sort_by_key(|b| b.date);
        raw.dedup_by_key(|b| b.date);
        forward_fill(&mut raw);
        // Drop leading bars that still carry gaps (nothing earlier to fill from)
        let first_clean = raw.iter().position(|b| !b.has_gap()).unwrap_or(raw.len());
        raw.drain(..first_clean);

        Self {
            symbol: symbol.into(),
            interval,
            bars: raw,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// The last `n` bars (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Aggregate a daily series into calendar-week bars.
    ///
    /// Per ISO week: open = first open, high = max high, low = min low,
    /// close = last close, volume = sum, date = last trading day of the week.
    pub fn resample_weekly(&self) -> BarSeries {
        let mut weekly: Vec<Bar> = Vec::new();
        let mut current_week = None;

        for bar in &self.bars {
            let week = (bar.date.iso_week().year(), bar.date.iso_week().week());
            match (current_week, weekly.last_mut()) {
                (Some(w), Some(agg)) if w == week => {
                    agg.high = agg.high.max(bar.high);
                    agg.low = agg.low.min(bar.low);
                    agg.close = bar.close;
                    agg.volume += bar.volume;
                    agg.date = bar.date;
                }
                _ => {
                    current_week = Some(week);
                    weekly.push(bar.clone());
                }
            }
        }

        BarSeries {
            symbol: self.symbol.clone(),
            interval: Interval::Weekly,
            bars: weekly,
        }
    }
}

/// Forward-fill NaN price fields from the prior bar. Volume is already
/// defaulted to zero upstream, so only prices are filled.
fn forward_fill(bars: &mut [Bar]) {
    for i in 1..bars.len() {
        let (prev, rest) = bars.split_at_mut(i);
        let prev = &prev[i - 1];
        let bar = &mut rest[0];
        if prev.has_gap() {
            continue;
        }
        if bar.open.is_nan() {
            bar.open = prev.close;
        }
        if bar.close.is_nan() {
            bar.close = prev.close;
        }
        if bar.high.is_nan() {
            bar.high = bar.open.max(bar.close);
        }
        if bar.low.is_nan() {
            bar.low = bar.open.min(bar.close);
        }
    }
}
