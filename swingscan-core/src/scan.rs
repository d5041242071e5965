//! Batch scanner — run the pipeline over a ticker list with per-item
//! failure isolation.
//!
//! A ticker that fails to fetch, parses badly, or has too little history is
//! skipped and reported; it never aborts the batch. Output rows are ranked
//! by score, best first.

use crate::analyze::{self, AnalysisError, AnalyzeConfig};
use crate::data::{BarCache, DataProvider};
use crate::domain::Interval;
use crate::indicators::CandlePattern;
use crate::score::{SignalLabel, TrendBias};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::io;
use std::path::Path;

/// Tickers with fewer daily bars than this are skipped outright; the long
/// lookbacks would leave almost every scoring input unavailable.
pub const SCAN_MIN_BARS: usize = 50;

/// Progress callback for multi-symbol scans.
pub trait ScanProgress: Send + Sync {
    /// Called when starting a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol finishes, scored or skipped.
    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: &Result<ScanRow, AnalysisError>,
    );

    /// Called once when the whole batch is done.
    fn on_batch_complete(&self, scored: usize, skipped: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Scanning {symbol}...", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<ScanRow, AnalysisError>,
    ) {
        match result {
            Ok(row) => println!("  {symbol}: {:+.1} ({})", row.score, row.label),
            Err(e) => println!("  SKIP {symbol}: {e}"),
        }
    }

    fn on_batch_complete(&self, scored: usize, skipped: usize, total: usize) {
        println!("\nScan complete: {scored}/{total} scored, {skipped} skipped");
    }
}

/// No-op progress for library callers that report their own way.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _result: &Result<ScanRow, AnalysisError>,
    ) {
    }
    fn on_batch_complete(&self, _scored: usize, _skipped: usize, _total: usize) {}
}

/// One ranked scanner result.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRow {
    pub symbol: String,
    pub score: f64,
    pub label: SignalLabel,
    pub price: f64,
    pub rsi: Option<f64>,
    pub weekly: TrendBias,
    pub candle: CandlePattern,
}

/// Scanner output: ranked rows plus the tickers that were skipped and why.
#[derive(Debug)]
pub struct ScanReport {
    /// Sorted by score, descending.
    pub rows: Vec<ScanRow>,
    pub skipped: Vec<(String, AnalysisError)>,
}

impl ScanReport {
    fn build(mut rows: Vec<ScanRow>, skipped: Vec<(String, AnalysisError)>) -> Self {
        rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Self { rows, skipped }
    }

    /// Write the ranked rows as CSV.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row).map_err(io::Error::other)?;
        }
        writer.flush()
    }
}

fn scan_one(
    provider: &dyn DataProvider,
    cache: &BarCache,
    symbol: &str,
    config: &AnalyzeConfig,
) -> Result<ScanRow, AnalysisError> {
    let daily = cache.get_or_fetch(provider, symbol, Interval::Daily)?;
    if daily.len() < SCAN_MIN_BARS {
        return Err(AnalysisError::InsufficientHistory {
            symbol: symbol.to_string(),
            have: daily.len(),
            need: SCAN_MIN_BARS,
        });
    }

    let analysis = analyze::analyze(provider, cache, symbol, config)?;
    Ok(ScanRow {
        symbol: analysis.symbol,
        score: analysis.signal.score,
        label: analysis.signal.label,
        price: analysis.snapshot.close,
        rsi: analysis.snapshot.rsi,
        weekly: analysis.signal.weekly,
        candle: analysis.snapshot.candle,
    })
}

/// Scan a ticker list sequentially.
pub fn scan(
    provider: &dyn DataProvider,
    cache: &BarCache,
    symbols: &[String],
    config: &AnalyzeConfig,
    progress: &dyn ScanProgress,
) -> ScanReport {
    let total = symbols.len();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);
        let result = scan_one(provider, cache, symbol, config);
        progress.on_complete(symbol, i, total, &result);
        match result {
            Ok(row) => rows.push(row),
            Err(e) => skipped.push((symbol.clone(), e)),
        }
    }

    progress.on_batch_complete(rows.len(), skipped.len(), total);
    ScanReport::build(rows, skipped)
}

/// Parallel scan with the same semantics. Safe because each per-ticker
/// analysis is independent and the cache is internally synchronized.
pub fn scan_par(
    provider: &dyn DataProvider,
    cache: &BarCache,
    symbols: &[String],
    config: &AnalyzeConfig,
    progress: &dyn ScanProgress,
) -> ScanReport {
    let total = symbols.len();

    let results: Vec<(String, Result<ScanRow, AnalysisError>)> = symbols
        .par_iter()
        .enumerate()
        .map(|(i, symbol)| {
            progress.on_start(symbol, i, total);
            let result = scan_one(provider, cache, symbol, config);
            progress.on_complete(symbol, i, total, &result);
            (symbol.clone(), result)
        })
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (symbol, result) in results {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => skipped.push((symbol, e)),
        }
    }

    progress.on_batch_complete(rows.len(), skipped.len(), total);
    ScanReport::build(rows, skipped)
}
