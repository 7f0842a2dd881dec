//! Velocity and turnover classification.
//!
//! Estimates how fast each item cycles: daily usage rate over the period,
//! turnover ratio against current stock, and days of inventory until
//! stock-out. Degenerate divisions resolve to documented sentinels instead
//! of faulting: 999 days for "effectively infinite" runway, a turnover of
//! 10 for "fully turned" zero-stock items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use stockledger_core::StockItem;
use stockledger_engine::LedgerRow;

/// Movement speed class of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    /// Turnover ratio of 3 or more.
    Fast,
    /// Turnover ratio of at least 1.
    Stable,
    /// Some consumption, turnover below 1.
    Slow,
    /// No consumption in the period.
    Dead,
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Stable => write!(f, "stable"),
            Self::Slow => write!(f, "slow"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// One velocity-classified row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocityRow {
    /// Stock item id.
    pub item_id: String,
    /// Stock item display name.
    pub name: String,
    /// Reporting category.
    pub category: String,
    /// Period consumption in stock units.
    pub consumption_qty: Decimal,
    /// Current on-hand quantity from master data.
    pub current_stock: Decimal,
    /// Consumption per day over the period.
    pub daily_usage_rate: Decimal,
    /// Consumption over current stock; 10 when stock is exhausted but
    /// consumption happened, 0 when both are zero.
    pub turnover_ratio: Decimal,
    /// Runway in days at the current usage rate; 999 when nothing is being
    /// consumed but stock remains, 0 when there is no stock either.
    pub days_of_inventory: Decimal,
    /// Assigned velocity class.
    pub velocity: Velocity,
}

/// Turnover ratio at or above which an item is `Fast`.
const FAST_TURNOVER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Sentinel turnover for consumed-but-empty items.
const FULLY_TURNED: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
/// Sentinel days-of-inventory for unconsumed stock.
const INFINITE_RUNWAY: Decimal = Decimal::from_parts(999, 0, 0, false, 0);

/// Classify ledger rows by velocity and turnover.
///
/// `current_stock` joins in from master data by item id; rows whose item is
/// missing from `items` fall back to zero stock. `period_day_count` comes
/// from [`PeriodWindow::day_count`](stockledger_core::PeriodWindow::day_count),
/// which is already floored at 1.
#[must_use]
pub fn classify_velocity(
    rows: &[LedgerRow],
    items: &[StockItem],
    period_day_count: i64,
) -> Vec<VelocityRow> {
    let stock_by_id: HashMap<&str, Decimal> = items
        .iter()
        .map(|item| (item.id.as_str(), item.current_stock))
        .collect();
    let day_count = Decimal::from(period_day_count.max(1));

    rows.iter()
        .map(|row| {
            let current_stock = stock_by_id
                .get(row.item_id.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);

            let daily_usage_rate = row.consumption_qty / day_count;

            let turnover_ratio = if current_stock > Decimal::ZERO {
                row.consumption_qty / current_stock
            } else if row.consumption_qty > Decimal::ZERO {
                FULLY_TURNED
            } else {
                Decimal::ZERO
            };

            let days_of_inventory = if daily_usage_rate > Decimal::ZERO {
                current_stock / daily_usage_rate
            } else if current_stock > Decimal::ZERO {
                INFINITE_RUNWAY
            } else {
                Decimal::ZERO
            };

            let velocity = if row.consumption_qty.is_zero() {
                Velocity::Dead
            } else if turnover_ratio >= FAST_TURNOVER {
                Velocity::Fast
            } else if turnover_ratio >= Decimal::ONE {
                Velocity::Stable
            } else {
                Velocity::Slow
            };

            VelocityRow {
                item_id: row.item_id.clone(),
                name: row.name.clone(),
                category: row.category.clone(),
                consumption_qty: row.consumption_qty,
                current_stock,
                daily_usage_rate,
                turnover_ratio,
                days_of_inventory,
                velocity,
            }
        })
        .collect()
}
