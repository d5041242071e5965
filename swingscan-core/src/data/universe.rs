//! Scan universe — index membership lists.
//!
//! Constituents are scraped best-effort from the Wikipedia index pages
//! (the symbol column links to exchange quote pages, which is the stable
//! part of the markup). Any failure falls back to a small built-in list;
//! resolving a universe is never an error to the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::provider::DataError;

/// Built-in fallback when the membership fetch fails.
const FALLBACK_TICKERS: [&str; 3] = ["AAPL", "MSFT", "NVDA"];

/// A named stock index whose membership can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexList {
    Sp500,
    Nasdaq100,
}

impl IndexList {
    pub fn name(&self) -> &'static str {
        match self {
            IndexList::Sp500 => "S&P 500",
            IndexList::Nasdaq100 => "Nasdaq-100",
        }
    }

    fn wikipedia_url(&self) -> &'static str {
        match self {
            IndexList::Sp500 => "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies",
            IndexList::Nasdaq100 => "https://en.wikipedia.org/wiki/Nasdaq-100",
        }
    }

    /// Fetch current constituents. Best-effort: any network or parse
    /// failure yields the built-in fallback universe instead of an error.
    pub fn fetch_members(&self) -> Universe {
        match self.try_fetch_members() {
            Ok(universe) if !universe.is_empty() => universe,
            _ => Universe::fallback(self.name()),
        }
    }

    fn try_fetch_members(&self) -> Result<Universe, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(e.to_string()))?;

        let html = client
            .get(self.wikipedia_url())
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| DataError::Network(e.to_string()))?
            .text()
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(Universe::from_tickers(self.name(), parse_quote_links(&html)))
    }
}

/// Extract ticker symbols from anchor tags whose href points at an
/// exchange quote page (`.../quote/XNYS:MMM" ...>MMM</a>`). The anchor
/// text is the symbol as displayed on the page.
fn parse_quote_links(html: &str) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut rest = html;

    while let Some(pos) = rest.find("/quote/") {
        rest = &rest[pos + "/quote/".len()..];
        let Some(gt) = rest.find('>') else { break };
        let after = &rest[gt + 1..];
        let Some(lt) = after.find('<') else { break };
        let text = after[..lt].trim();
        if looks_like_ticker(text) {
            symbols.push(text.to_string());
        }
        rest = &after[lt..];
    }

    symbols
}

fn looks_like_ticker(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 6
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}

/// A named, ordered, deduplicated list of ticker symbols to scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    pub name: String,
    pub tickers: Vec<String>,
}

impl Universe {
    /// Build a universe, normalizing symbols on the way in: trim,
    /// uppercase, `.` to `-` (the share-class convention the data
    /// provider expects, e.g. BRK.B -> BRK-B), dedupe keeping order.
    pub fn from_tickers<I, S>(name: impl Into<String>, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = std::collections::HashSet::new();
        let tickers = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_uppercase().replace('.', "-"))
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self {
            name: name.into(),
            tickers,
        }
    }

    /// The built-in fallback universe.
    pub fn fallback(name: &str) -> Self {
        Self::from_tickers(name, FALLBACK_TICKERS)
    }

    /// Load a ticker list from a TOML file (`name`, `tickers` keys).
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::Other(format!("read universe file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        let raw: Universe = toml::from_str(content)
            .map_err(|e| DataError::Other(format!("parse universe TOML: {e}")))?;
        Ok(Self::from_tickers(raw.name, raw.tickers))
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}
