//! swingscan CLI — analyze, scan, and size commands.
//!
//! Commands:
//! - `analyze` — run the full pipeline for one symbol and print the verdict
//! - `scan` — rank an index or ticker list by confluence score
//! - `size` — standalone position calculator (plus DCA averaging)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swingscan_core::analyze::{analyze, AnalyzeConfig};
use swingscan_core::data::{
    BarCache, DataProvider, IndexList, SyntheticProvider, Universe, YahooProvider,
};
use swingscan_core::report::summary;
use swingscan_core::risk::{self, Direction, Lot};
use swingscan_core::scan::{scan, scan_par, StdoutProgress};

#[derive(Parser)]
#[command(name = "swingscan", about = "swingscan CLI — confluence-scoring market scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum IndexArg {
    Sp500,
    Nasdaq100,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Long,
    Short,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for one symbol and print the verdict.
    Analyze {
        /// Ticker symbol (e.g. AAPL).
        symbol: String,

        /// Account capital. Overrides the config file.
        #[arg(long)]
        capital: Option<f64>,

        /// Percent of capital risked per trade. Overrides the config file.
        #[arg(long)]
        risk_pct: Option<f64>,

        /// Pipeline config TOML (indicators, scoring, risk).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: deterministic synthetic bars, no network.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Write the full analysis as pretty JSON.
        #[arg(long)]
        json_out: Option<PathBuf>,
    },
    /// Scan an index or ticker list and print a ranked table.
    Scan {
        /// Index whose constituents to scan.
        #[arg(long, value_enum)]
        index: Option<IndexArg>,

        /// Explicit tickers to scan instead of an index.
        #[arg(long, num_args = 1..)]
        tickers: Vec<String>,

        /// Pipeline config TOML.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scan tickers in parallel.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Offline mode: deterministic synthetic bars, no network.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Write the ranked rows as CSV.
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Standalone position calculator.
    Size {
        /// Entry price.
        #[arg(long)]
        entry: f64,

        /// ATR at entry (stop/target distance unit).
        #[arg(long)]
        atr: f64,

        /// Account capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Percent of capital risked per trade.
        #[arg(long, default_value_t = 1.0)]
        risk_pct: f64,

        #[arg(long, value_enum, default_value = "long")]
        direction: DirectionArg,

        /// Existing lots for DCA averaging, e.g. "10@160,5@145".
        #[arg(long)]
        dca: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            capital,
            risk_pct,
            config,
            offline,
            json_out,
        } => run_analyze(symbol, capital, risk_pct, config, offline, json_out),
        Commands::Scan {
            index,
            tickers,
            config,
            parallel,
            offline,
            csv_out,
        } => run_scan(index, tickers, config, parallel, offline, csv_out),
        Commands::Size {
            entry,
            atr,
            capital,
            risk_pct,
            direction,
            dca,
        } => run_size(entry, atr, capital, risk_pct, direction, dca),
    }
}

fn load_config(
    path: Option<&PathBuf>,
    capital: Option<f64>,
    risk_pct: Option<f64>,
) -> Result<AnalyzeConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            AnalyzeConfig::from_toml(&content)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => AnalyzeConfig::default(),
    };
    if let Some(capital) = capital {
        config.risk.capital = capital;
    }
    if let Some(risk_pct) = risk_pct {
        config.risk.risk_pct = risk_pct;
    }
    Ok(config)
}

fn make_provider(offline: bool) -> Box<dyn DataProvider> {
    if offline {
        Box::new(SyntheticProvider::default())
    } else {
        Box::new(YahooProvider::new())
    }
}

fn run_analyze(
    symbol: String,
    capital: Option<f64>,
    risk_pct: Option<f64>,
    config_path: Option<PathBuf>,
    offline: bool,
    json_out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_ref(), capital, risk_pct)?;
    let provider = make_provider(offline);
    let cache = BarCache::default();

    let symbol = symbol.trim().to_uppercase();
    let analysis = analyze(provider.as_ref(), &cache, &symbol, &config)
        .with_context(|| format!("analyze {symbol}"))?;

    println!("{symbol}  close {:.2}", analysis.snapshot.close);
    println!(
        "  signal: {} (score {:+.1}, weekly {})",
        analysis.signal.label, analysis.signal.score, analysis.signal.weekly
    );
    for factor in &analysis.signal.factors {
        let mark = if factor.fired { "*" } else { " " };
        println!("  {mark} {:<22} {:+.1}", factor.name, factor.contribution);
    }

    let snap = &analysis.snapshot;
    println!(
        "  rsi {}  atr {}  adx {}  candle {}",
        fmt_opt(snap.rsi),
        fmt_opt(snap.atr),
        fmt_opt(snap.adx),
        snap.candle
    );

    if let Some(plan) = &analysis.plan {
        println!(
            "  plan: entry {:.2}  stop {:.2}  targets {}",
            plan.entry,
            plan.stop,
            plan.targets
                .iter()
                .map(|t| format!("{t:.2}"))
                .collect::<Vec<_>>()
                .join(" / ")
        );
        println!(
            "  qty {} (risk {:.2}, invested {:.2}{})",
            plan.quantity,
            plan.risk_amount,
            plan.invested,
            if plan.exceeds_capital {
                ", exceeds capital"
            } else {
                ""
            }
        );
    }

    println!("\n{}", summary::render(&analysis, None));

    if let Some(path) = json_out {
        analysis
            .write_json(&path)
            .with_context(|| format!("write {}", path.display()))?;
        println!("Analysis saved to: {}", path.display());
    }

    Ok(())
}

fn run_scan(
    index: Option<IndexArg>,
    tickers: Vec<String>,
    config_path: Option<PathBuf>,
    parallel: bool,
    offline: bool,
    csv_out: Option<PathBuf>,
) -> Result<()> {
    if index.is_some() && !tickers.is_empty() {
        bail!("--index and --tickers are mutually exclusive");
    }

    let universe = if !tickers.is_empty() {
        Universe::from_tickers("custom", tickers)
    } else {
        let index = match index.unwrap_or(IndexArg::Sp500) {
            IndexArg::Sp500 => IndexList::Sp500,
            IndexArg::Nasdaq100 => IndexList::Nasdaq100,
        };
        if offline {
            Universe::fallback(index.name())
        } else {
            index.fetch_members()
        }
    };
    println!("Scanning {} ({} tickers)\n", universe.name, universe.len());

    let config = load_config(config_path.as_ref(), None, None)?;
    let provider = make_provider(offline);
    let cache = BarCache::default();

    let report = if parallel {
        scan_par(provider.as_ref(), &cache, &universe.tickers, &config, &StdoutProgress)
    } else {
        scan(provider.as_ref(), &cache, &universe.tickers, &config, &StdoutProgress)
    };

    println!("\n{:<8} {:>6}  {:<12} {:>9}  {:>5}  {:<16} {}",
        "symbol", "score", "label", "price", "rsi", "weekly", "candle");
    for row in &report.rows {
        println!(
            "{:<8} {:>+6.1}  {:<12} {:>9.2}  {:>5}  {:<16} {}",
            row.symbol,
            row.score,
            row.label.to_string(),
            row.price,
            row.rsi.map_or("-".into(), |v| format!("{v:.0}")),
            row.weekly.to_string(),
            row.candle
        );
    }

    if let Some(path) = csv_out {
        report
            .write_csv(&path)
            .with_context(|| format!("write {}", path.display()))?;
        println!("\nCSV saved to: {}", path.display());
    }

    Ok(())
}

fn run_size(
    entry: f64,
    atr: f64,
    capital: f64,
    risk_pct: f64,
    direction: DirectionArg,
    dca: Option<String>,
) -> Result<()> {
    if entry <= 0.0 {
        bail!("--entry must be positive");
    }
    if atr < 0.0 {
        bail!("--atr must be non-negative");
    }

    let config = risk::RiskConfig {
        capital,
        risk_pct,
        ..Default::default()
    };
    let direction = match direction {
        DirectionArg::Long => Direction::Long,
        DirectionArg::Short => Direction::Short,
    };
    let plan = risk::plan(entry, direction, atr, &config);

    println!("entry {:.2}  stop {:.2}", plan.entry, plan.stop);
    for (i, target) in plan.targets.iter().enumerate() {
        println!("target {} = {:.2}", i + 1, target);
    }
    println!(
        "qty {}  risk {:.2}  invested {:.2}{}",
        plan.quantity,
        plan.risk_amount,
        plan.invested,
        if plan.exceeds_capital {
            "  (exceeds capital)"
        } else {
            ""
        }
    );

    if let Some(spec) = dca {
        let lots = parse_lots(&spec)?;
        match risk::average_entry(&lots) {
            Some(result) => println!(
                "dca: average {:.2}  total qty {}",
                result.average_price, result.total_quantity
            ),
            None => println!("dca: N/A (zero total quantity)"),
        }
    }

    Ok(())
}

/// Format an optional indicator value, "-" when not yet available.
fn fmt_opt(value: Option<f64>) -> String {
    value.map_or("-".into(), |v| format!("{v:.2}"))
}

/// Parse "10@160,5@145" into lots.
fn parse_lots(spec: &str) -> Result<Vec<Lot>> {
    spec.split(',')
        .map(|part| {
            let (qty, price) = part
                .trim()
                .split_once('@')
                .with_context(|| format!("expected qty@price, got '{part}'"))?;
            Ok(Lot {
                quantity: qty.trim().parse().with_context(|| format!("bad quantity '{qty}'"))?,
                price: price.trim().parse().with_context(|| format!("bad price '{price}'"))?,
            })
        })
        .collect()
}
