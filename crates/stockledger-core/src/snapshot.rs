//! The repository snapshot.
//!
//! A [`Snapshot`] is the complete, read-only input to every computation:
//! master data plus the six transaction record collections. The engine never
//! reads ambient state; callers build or load a snapshot and pass it in, so
//! tests can supply synthetic ones directly.

use serde::{Deserialize, Serialize};

use crate::item::{Location, StockItem};
use crate::recipe::Recipe;
use crate::record::{
    ProductionRun, PurchaseReceipt, SaleTicket, StocktakeCount, TransactionRecord,
    TransferMovement, WasteEntry,
};

/// An immutable snapshot of the record repository.
///
/// Collections preserve insertion order; the ledger engine relies on that
/// order to break date ties between stocktakes (later record wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Stock item master data.
    #[serde(default)]
    pub items: Vec<StockItem>,
    /// Bills of materials, keyed by menu item.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Purchase receipts.
    #[serde(default)]
    pub purchases: Vec<PurchaseReceipt>,
    /// Production runs.
    #[serde(default)]
    pub production_runs: Vec<ProductionRun>,
    /// Waste entries.
    #[serde(default)]
    pub waste_entries: Vec<WasteEntry>,
    /// Inter-location transfers.
    #[serde(default)]
    pub transfers: Vec<TransferMovement>,
    /// Point-of-sale tickets.
    #[serde(default)]
    pub sales: Vec<SaleTicket>,
    /// Physical stocktake counts.
    #[serde(default)]
    pub stocktakes: Vec<StocktakeCount>,
    /// Branch master rows (display only).
    #[serde(default)]
    pub branches: Vec<Location>,
    /// Warehouse master rows (display only).
    #[serde(default)]
    pub warehouses: Vec<Location>,
}

impl Snapshot {
    /// Look up a stock item by id.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&StockItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Look up the recipe for a menu item.
    #[must_use]
    pub fn recipe(&self, menu_item_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.menu_item_id == menu_item_id)
    }

    /// Active stock items, in master-data order.
    pub fn active_items(&self) -> impl Iterator<Item = &StockItem> {
        self.items.iter().filter(|i| i.active)
    }

    /// Total number of transaction records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.purchases.len()
            + self.production_runs.len()
            + self.waste_entries.len()
            + self.transfers.len()
            + self.sales.len()
            + self.stocktakes.len()
    }

    /// Every transaction record as the tagged union, collection by
    /// collection in insertion order.
    ///
    /// Clones each record; meant for kind-agnostic walks (statistics,
    /// generic filtering), not for the reconciliation hot path, which reads
    /// the typed collections directly.
    pub fn records(&self) -> impl Iterator<Item = TransactionRecord> + '_ {
        self.purchases
            .iter()
            .cloned()
            .map(TransactionRecord::Purchase)
            .chain(
                self.production_runs
                    .iter()
                    .cloned()
                    .map(TransactionRecord::Production),
            )
            .chain(
                self.waste_entries
                    .iter()
                    .cloned()
                    .map(TransactionRecord::Waste),
            )
            .chain(self.transfers.iter().cloned().map(TransactionRecord::Transfer))
            .chain(self.sales.iter().cloned().map(TransactionRecord::Sale))
            .chain(
                self.stocktakes
                    .iter()
                    .cloned()
                    .map(TransactionRecord::Stocktake),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn lookups_by_id() {
        let snapshot = Snapshot {
            items: vec![StockItem {
                id: "flour".into(),
                name: "Flour".into(),
                category: "Dry Goods".into(),
                stock_unit: "kg".into(),
                recipe_unit: "g".into(),
                conversion_factor: dec!(1000),
                avg_cost: dec!(2.50),
                current_stock: dec!(40),
                reorder_level: dec!(10),
                min_level: dec!(5),
                active: true,
            }],
            recipes: vec![Recipe::new("pizza").with_ingredient("flour", dec!(250))],
            ..Snapshot::default()
        };

        assert!(snapshot.item("flour").is_some());
        assert!(snapshot.item("sugar").is_none());
        assert!(snapshot.recipe("pizza").is_some());
        assert!(snapshot.recipe("pasta").is_none());
    }

    #[test]
    fn record_count_spans_all_collections() {
        let mut snapshot = Snapshot::default();
        snapshot.sales.push(SaleTicket {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: RecordStatus::Posted,
            location_id: "branch-1".into(),
            lines: vec![],
        });
        snapshot.stocktakes.push(StocktakeCount {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: RecordStatus::Draft,
            location_id: "branch-1".into(),
            kind: crate::record::StocktakeKind::Regular,
            lines: vec![],
        });

        assert_eq!(snapshot.record_count(), 2);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = Snapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
