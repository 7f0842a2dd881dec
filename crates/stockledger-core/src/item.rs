//! Stock item and location master data.
//!
//! A [`StockItem`] is a raw material tracked by the ledger: flour, beef,
//! cooking oil. Master data owns these rows; the engine only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock item from master data.
///
/// The `avg_cost` field is the *current* weighted average cost per stock
/// unit. It is a single scalar, not a time series: every valuation, even of
/// historical periods, uses this snapshot value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Reporting category (e.g. "Meat", "Dairy", "Dry Goods").
    pub category: String,
    /// Unit the item is stocked and counted in (e.g. "kg").
    pub stock_unit: String,
    /// Unit recipes measure the item in (e.g. "g").
    pub recipe_unit: String,
    /// Recipe-unit to stock-unit ratio. Values `<= 0` are treated as 1.
    pub conversion_factor: Decimal,
    /// Current weighted average cost per stock unit.
    pub avg_cost: Decimal,
    /// Current on-hand quantity in stock units.
    pub current_stock: Decimal,
    /// Reorder threshold in stock units.
    pub reorder_level: Decimal,
    /// Hard minimum level in stock units.
    pub min_level: Decimal,
    /// Inactive items are excluded from every computation.
    pub active: bool,
}

impl StockItem {
    /// The conversion factor with the `<= 0` guard applied.
    ///
    /// Recipe quantities are divided by this to convert recipe units into
    /// stock units. A zero or negative stored factor would poison the
    /// division, so it degrades to 1.
    #[must_use]
    pub fn effective_conversion_factor(&self) -> Decimal {
        if self.conversion_factor <= Decimal::ZERO {
            Decimal::ONE
        } else {
            self.conversion_factor
        }
    }
}

/// A branch or warehouse master row.
///
/// Locations are display-only master data; computations match on the raw
/// location id strings carried by transaction records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(factor: Decimal) -> StockItem {
        StockItem {
            id: "flour".into(),
            name: "Flour".into(),
            category: "Dry Goods".into(),
            stock_unit: "kg".into(),
            recipe_unit: "g".into(),
            conversion_factor: factor,
            avg_cost: dec!(2.50),
            current_stock: dec!(40),
            reorder_level: dec!(10),
            min_level: dec!(5),
            active: true,
        }
    }

    #[test]
    fn conversion_factor_passthrough() {
        assert_eq!(item(dec!(1000)).effective_conversion_factor(), dec!(1000));
    }

    #[test]
    fn conversion_factor_defaults_to_one() {
        assert_eq!(item(Decimal::ZERO).effective_conversion_factor(), Decimal::ONE);
        assert_eq!(item(dec!(-2)).effective_conversion_factor(), Decimal::ONE);
    }
}
