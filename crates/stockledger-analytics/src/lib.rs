//! Strategic inventory analytics.
//!
//! Consumes reconciled [`LedgerRow`](stockledger_engine::LedgerRow)s and
//! derives the two strategic classifications:
//!
//! - [`classify_abc`] - ABC/Pareto value classes over consumption value
//! - [`classify_velocity`] - velocity, turnover ratio, and days of
//!   inventory against current stock
//! - [`annotate`] - both classifications merged into one row per item
//!
//! All of them are pure functions over their inputs; none mutates the rows.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod abc;
pub mod velocity;

pub use abc::{classify_abc, AbcClass, AbcRow};
pub use velocity::{classify_velocity, Velocity, VelocityRow};

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use stockledger_core::StockItem;
use stockledger_engine::LedgerRow;

/// One fully annotated analytics row: usage stats plus the ABC class,
/// velocity class, days of inventory, and turnover ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsRow {
    /// Stock item id.
    pub item_id: String,
    /// Stock item display name.
    pub name: String,
    /// Reporting category.
    pub category: String,
    /// Period consumption in stock units.
    pub consumption_qty: Decimal,
    /// Consumption valued at the current average cost.
    pub usage_value: Decimal,
    /// Cumulative share of total usage value, in percent.
    pub cumulative_share: Decimal,
    /// Pareto value class.
    pub abc_class: AbcClass,
    /// Current on-hand quantity from master data.
    pub current_stock: Decimal,
    /// Consumption per day over the period.
    pub daily_usage_rate: Decimal,
    /// Consumption over current stock.
    pub turnover_ratio: Decimal,
    /// Runway in days at the current usage rate.
    pub days_of_inventory: Decimal,
    /// Movement speed class.
    pub velocity: Velocity,
}

/// Run both classifiers and merge their outputs by item.
///
/// Rows come back in ABC order (usage value descending, stable on ties).
#[must_use]
pub fn annotate(
    rows: &[LedgerRow],
    items: &[StockItem],
    period_day_count: i64,
) -> Vec<AnalyticsRow> {
    let by_velocity: HashMap<String, VelocityRow> =
        classify_velocity(rows, items, period_day_count)
            .into_iter()
            .map(|row| (row.item_id.clone(), row))
            .collect();

    classify_abc(rows)
        .into_iter()
        .filter_map(|abc| {
            let velocity = by_velocity.get(&abc.item_id)?;
            Some(AnalyticsRow {
                item_id: abc.item_id,
                name: abc.name,
                category: abc.category,
                consumption_qty: abc.consumption_qty,
                usage_value: abc.usage_value,
                cumulative_share: abc.cumulative_share,
                abc_class: abc.class,
                current_stock: velocity.current_stock,
                daily_usage_rate: velocity.daily_usage_rate,
                turnover_ratio: velocity.turnover_ratio,
                days_of_inventory: velocity.days_of_inventory,
                velocity: velocity.velocity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(item_id: &str, consumption_qty: Decimal) -> LedgerRow {
        LedgerRow {
            item_id: item_id.into(),
            name: item_id.to_uppercase(),
            category: "Kitchen".into(),
            unit: "kg".into(),
            avg_cost: Decimal::ONE,
            opening_qty: Decimal::ZERO,
            opening_value: Decimal::ZERO,
            receiving_qty: Decimal::ZERO,
            receiving_value: Decimal::ZERO,
            consumption_qty,
            consumption_value: consumption_qty,
            closing_book_qty: Decimal::ZERO,
            closing_book_value: Decimal::ZERO,
            physical_qty: Decimal::ZERO,
            physical_value: Decimal::ZERO,
            variance_qty: Decimal::ZERO,
            variance_value: Decimal::ZERO,
        }
    }

    fn item(id: &str, current_stock: Decimal) -> StockItem {
        StockItem {
            id: id.into(),
            name: id.to_uppercase(),
            category: "Kitchen".into(),
            stock_unit: "kg".into(),
            recipe_unit: "kg".into(),
            conversion_factor: Decimal::ONE,
            avg_cost: Decimal::ONE,
            current_stock,
            reorder_level: Decimal::ZERO,
            min_level: Decimal::ZERO,
            active: true,
        }
    }

    #[test]
    fn annotate_merges_both_classifications() {
        let rows = vec![row("beef", dec!(600)), row("rice", dec!(100))];
        let items = vec![item("beef", dec!(200)), item("rice", dec!(100))];

        let annotated = annotate(&rows, &items, 30);
        assert_eq!(annotated.len(), 2);

        // ABC order: largest usage value first. Beef carries 600/700 of the
        // usage value, an 85.7% cumulative share, landing in class B.
        assert_eq!(annotated[0].item_id, "beef");
        assert_eq!(annotated[0].abc_class, AbcClass::B);
        assert_eq!(annotated[0].velocity, Velocity::Fast);
        assert_eq!(annotated[0].turnover_ratio, dec!(3));

        assert_eq!(annotated[1].item_id, "rice");
        assert_eq!(annotated[1].velocity, Velocity::Stable);
    }

    #[test]
    fn every_ledger_row_is_annotated_exactly_once() {
        let rows = vec![row("a", dec!(5)), row("b", dec!(5)), row("c", dec!(0))];
        let items = vec![
            item("a", dec!(1)),
            item("b", dec!(1)),
            item("c", dec!(1)),
        ];

        let annotated = annotate(&rows, &items, 7);
        let mut ids: Vec<&str> = annotated.iter().map(|r| r.item_id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}

