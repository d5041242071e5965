//! Risk sizing — translate a signal plus a volatility measure into a
//! concrete trade plan, and blend average entry prices for DCA.
//!
//! Position size = (capital * risk_fraction) / |entry - stop|, floored to
//! whole shares, clamped to zero when the stop distance is degenerate.
//! An invested amount above capital is flagged, not blocked — this is
//! decision support, not an order gateway.

use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

/// Capital, risk fraction, and ATR multipliers for stop/target placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub capital: f64,
    /// Percent of capital risked per trade (0-100).
    pub risk_pct: f64,
    pub stop_atr_mult: f64,
    pub target_atr_mults: Vec<f64>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            capital: 10_000.0,
            risk_pct: 1.0,
            stop_atr_mult: 1.5,
            target_atr_mults: vec![1.5, 3.0],
        }
    }
}

/// A sizing decision for a hypothetical trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPlan {
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub targets: Vec<f64>,
    pub risk_amount: f64,
    /// Whole shares; zero when the stop distance is degenerate.
    pub quantity: u64,
    pub invested: f64,
    /// Set when invested > capital. A warning, not a rejection.
    pub exceeds_capital: bool,
}

/// Build a trade plan from the current price and ATR.
pub fn plan(entry: f64, direction: Direction, atr: f64, config: &RiskConfig) -> RiskPlan {
    let stop_distance = config.stop_atr_mult * atr;
    let (stop, targets) = match direction {
        Direction::Long => (
            entry - stop_distance,
            config
                .target_atr_mults
                .iter()
                .map(|m| entry + m * atr)
                .collect(),
        ),
        Direction::Short => (
            entry + stop_distance,
            config
                .target_atr_mults
                .iter()
                .map(|m| entry - m * atr)
                .collect(),
        ),
    };

    let risk_amount = config.capital * (config.risk_pct / 100.0);
    let quantity = if stop_distance > 0.0 {
        (risk_amount / stop_distance).floor() as u64
    } else {
        0
    };
    let invested = quantity as f64 * entry;

    RiskPlan {
        direction,
        entry,
        stop,
        targets,
        risk_amount,
        quantity,
        invested,
        exceeds_capital: invested > config.capital,
    }
}

/// One position lot: quantity at a price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lot {
    pub quantity: f64,
    pub price: f64,
}

/// Blended average entry after adding to a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaResult {
    pub average_price: f64,
    pub total_quantity: f64,
}

/// Weighted-average entry price across lots. None when the total quantity
/// is zero (undefined, reported as "N/A" downstream).
pub fn average_entry(lots: &[Lot]) -> Option<DcaResult> {
    let total_quantity: f64 = lots.iter().map(|l| l.quantity).sum();
    if total_quantity == 0.0 {
        return None;
    }
    let total_cost: f64 = lots.iter().map(|l| l.quantity * l.price).sum();
    Some(DcaResult {
        average_price: total_cost / total_quantity,
        total_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        // capital 10000, risk 1%, entry 150, ATR 2.5, stop mult 1.5:
        // distance 3.75, risk 100, quantity floor(100/3.75) = 26
        let config = RiskConfig::default();
        let p = plan(150.0, Direction::Long, 2.5, &config);
        assert_eq!(p.stop, 150.0 - 3.75);
        assert_eq!(p.risk_amount, 100.0);
        assert_eq!(p.quantity, 26);
        assert_eq!(p.invested, 26.0 * 150.0);
        assert_eq!(p.targets, vec![150.0 + 3.75, 150.0 + 7.5]);
    }

    #[test]
    fn zero_stop_distance_sizes_to_zero() {
        let config = RiskConfig::default();
        let p = plan(150.0, Direction::Long, 0.0, &config);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.invested, 0.0);
        assert!(!p.exceeds_capital);
    }

    #[test]
    fn short_mirrors_stop_and_targets() {
        let config = RiskConfig::default();
        let p = plan(150.0, Direction::Short, 2.5, &config);
        assert_eq!(p.stop, 150.0 + 3.75);
        assert_eq!(p.targets, vec![150.0 - 3.75, 150.0 - 7.5]);
        assert_eq!(p.quantity, 26);
    }

    #[test]
    fn oversized_position_is_flagged_not_blocked() {
        let config = RiskConfig {
            capital: 1_000.0,
            risk_pct: 10.0,
            stop_atr_mult: 1.5,
            target_atr_mults: vec![3.0],
        };
        // risk 100, ATR 0.1 -> distance 0.15 -> 666 shares at 150 = 99,900
        let p = plan(150.0, Direction::Long, 0.1, &config);
        assert!(p.quantity > 0);
        assert!(p.exceeds_capital);
        assert!(p.invested > config.capital);
    }

    #[test]
    fn dca_exact_arithmetic() {
        // 10 @ 160 + 5 @ 145 -> (1600 + 725) / 15 = 155.0
        let result = average_entry(&[
            Lot { quantity: 10.0, price: 160.0 },
            Lot { quantity: 5.0, price: 145.0 },
        ])
        .unwrap();
        assert_eq!(result.average_price, 155.0);
        assert_eq!(result.total_quantity, 15.0);
    }

    #[test]
    fn dca_zero_quantity_is_none() {
        assert!(average_entry(&[]).is_none());
        assert!(average_entry(&[Lot { quantity: 0.0, price: 100.0 }]).is_none());
    }

    #[test]
    fn dca_single_lot_is_identity() {
        let result = average_entry(&[Lot { quantity: 3.0, price: 42.0 }]).unwrap();
        assert_eq!(result.average_price, 42.0);
        assert_eq!(result.total_quantity, 3.0);
    }
}
