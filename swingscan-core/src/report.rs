//! Presentation model — the crate's entire output contract.
//!
//! Downstream consumers (CLI tables, chart renderers, journal export) get a
//! `Signal`, an optional `RiskPlan`, the latest `IndicatorSnapshot`, and a
//! tail of bars for charting. Nothing else crosses the boundary.

use crate::domain::Bar;
use crate::frame::IndicatorSnapshot;
use crate::risk::RiskPlan;
use crate::score::Signal;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Bars kept for charting by default.
pub const DEFAULT_TAIL: usize = 180;

/// Everything the pipeline produces for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub symbol: String,
    pub signal: Signal,
    /// Present only for non-neutral signals (long or short per the label).
    pub plan: Option<RiskPlan>,
    pub snapshot: IndicatorSnapshot,
    /// The most recent bars, oldest first.
    pub tail: Vec<Bar>,
}

impl Analysis {
    /// Write the analysis as a pretty-printed JSON artifact.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

pub mod summary {
    //! Fixed-template journal line for copy-paste into a trading log.

    use super::Analysis;
    use crate::risk::DcaResult;
    use std::fmt::Write;

    /// Sentinel printed when a DCA average does not exist yet.
    const NOT_AVAILABLE: &str = "N/A";

    /// Render the journal line:
    /// `SYM | Ent: 150.00 | SL: 146.25 | TP1: 153.75 | TP2: 157.50 | Qtd: 26 | Risk: 100.00 | PM: N/A | QtdTotal: N/A`
    ///
    /// A neutral analysis carries no plan; the line says so instead of
    /// interpolating zeros that would look like a real trade.
    pub fn render(analysis: &Analysis, dca: Option<&DcaResult>) -> String {
        let Some(plan) = &analysis.plan else {
            return format!("{} | no trade plan ({})", analysis.symbol, analysis.signal.label);
        };

        let mut line = format!(
            "{} | Ent: {:.2} | SL: {:.2}",
            analysis.symbol, plan.entry, plan.stop
        );
        for (i, target) in plan.targets.iter().enumerate() {
            let _ = write!(line, " | TP{}: {target:.2}", i + 1);
        }
        let _ = write!(
            line,
            " | Qtd: {} | Risk: {:.2}",
            plan.quantity, plan.risk_amount
        );

        match dca {
            Some(d) => {
                let _ = write!(
                    line,
                    " | PM: {:.2} | QtdTotal: {}",
                    d.average_price, d.total_quantity
                );
            }
            None => {
                let _ = write!(line, " | PM: {NOT_AVAILABLE} | QtdTotal: {NOT_AVAILABLE}");
            }
        }

        line
    }
}
