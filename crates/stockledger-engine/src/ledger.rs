//! Period ledger reconciliation.
//!
//! [`reconcile`] derives one [`LedgerRow`] per active stock item for a
//! period and location filter, plus category subtotals and a grand total.
//! The same pass feeds every report view; none of them re-derives balances.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use stockledger_core::{
    LocationFilter, PeriodWindow, Snapshot, StocktakeCount, StocktakeKind,
};

use crate::explode::RecipeResolver;

/// The reconciliation tuple for one stock item.
///
/// Rows are derived fresh per query and never persisted. Every `*_value`
/// field is its `*_qty` companion valued at the item's current `avg_cost`
/// snapshot; historical periods deliberately use today's cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    /// Stock item id.
    pub item_id: String,
    /// Stock item display name.
    pub name: String,
    /// Reporting category.
    pub category: String,
    /// Stock unit the quantities are expressed in.
    pub unit: String,
    /// Current average cost per stock unit.
    pub avg_cost: Decimal,
    /// Balance carried in from the most recent opening/closing count before
    /// the period.
    pub opening_qty: Decimal,
    /// Opening balance valued at `avg_cost`.
    pub opening_value: Decimal,
    /// Purchases + production output + transfers in.
    pub receiving_qty: Decimal,
    /// Receipts valued at `avg_cost`.
    pub receiving_value: Decimal,
    /// Exploded sales + production ingredients + waste + transfers out.
    pub consumption_qty: Decimal,
    /// Consumption valued at `avg_cost`.
    pub consumption_value: Decimal,
    /// `opening + receiving - consumption`, unclamped.
    pub closing_book_qty: Decimal,
    /// Book balance valued at `avg_cost`.
    pub closing_book_value: Decimal,
    /// Most recent in-period physical count, 0 when never counted.
    pub physical_qty: Decimal,
    /// Physical count valued at `avg_cost`.
    pub physical_value: Decimal,
    /// `physical - closing_book`.
    pub variance_qty: Decimal,
    /// Variance valued at `avg_cost`.
    pub variance_value: Decimal,
}

/// Sums of every numeric ledger column.
///
/// Quantity sums mix units across items; they are reported anyway because
/// the views render them, but value sums are the meaningful aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    /// Sum of opening quantities.
    pub opening_qty: Decimal,
    /// Sum of opening values.
    pub opening_value: Decimal,
    /// Sum of receiving quantities.
    pub receiving_qty: Decimal,
    /// Sum of receiving values.
    pub receiving_value: Decimal,
    /// Sum of consumption quantities.
    pub consumption_qty: Decimal,
    /// Sum of consumption values.
    pub consumption_value: Decimal,
    /// Sum of closing book quantities.
    pub closing_book_qty: Decimal,
    /// Sum of closing book values.
    pub closing_book_value: Decimal,
    /// Sum of physical quantities.
    pub physical_qty: Decimal,
    /// Sum of physical values.
    pub physical_value: Decimal,
    /// Sum of variance quantities.
    pub variance_qty: Decimal,
    /// Sum of variance values.
    pub variance_value: Decimal,
}

impl LedgerTotals {
    /// Fold one row into the totals.
    pub fn accumulate(&mut self, row: &LedgerRow) {
        self.opening_qty += row.opening_qty;
        self.opening_value += row.opening_value;
        self.receiving_qty += row.receiving_qty;
        self.receiving_value += row.receiving_value;
        self.consumption_qty += row.consumption_qty;
        self.consumption_value += row.consumption_value;
        self.closing_book_qty += row.closing_book_qty;
        self.closing_book_value += row.closing_book_value;
        self.physical_qty += row.physical_qty;
        self.physical_value += row.physical_value;
        self.variance_qty += row.variance_qty;
        self.variance_value += row.variance_value;
    }
}

/// Subtotals for one category of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    /// The category the subtotal covers.
    pub category: String,
    /// Column sums over the category's rows.
    pub totals: LedgerTotals,
}

/// The full output of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    /// The reconciled period.
    pub period: PeriodWindow,
    /// The location scope.
    pub location: LocationFilter,
    /// Per-item rows, ordered by (category, name, id).
    pub rows: Vec<LedgerRow>,
    /// Category subtotals, in row order.
    pub category_totals: Vec<CategoryTotals>,
    /// Column sums over every row.
    pub grand_total: LedgerTotals,
}

/// Per-item quantity accumulators for one reconciliation pass.
#[derive(Default)]
struct Movements {
    receiving: HashMap<String, Decimal>,
    consumption: HashMap<String, Decimal>,
}

impl Movements {
    fn receive(&mut self, item_id: &str, qty: Decimal) {
        *self.receiving.entry(item_id.to_string()).or_default() += qty;
    }

    fn consume(&mut self, item_id: &str, qty: Decimal) {
        *self.consumption.entry(item_id.to_string()).or_default() += qty;
    }
}

/// Reconcile the period ledger for every active stock item.
///
/// Only posted records inside the period and matching `location`
/// participate. `category` restricts the row set to one category by exact
/// match. The computation is pure: it reads the snapshot, allocates its own
/// working state, and returns a fresh report.
#[must_use]
pub fn reconcile(
    snapshot: &Snapshot,
    period: PeriodWindow,
    location: &LocationFilter,
    category: Option<&str>,
) -> LedgerReport {
    let resolver = RecipeResolver::new(&snapshot.recipes, &snapshot.items);
    let movements = collect_movements(snapshot, period, location, &resolver);

    let opening = latest_stocktake(snapshot, location, |count| {
        count.kind != StocktakeKind::Regular && count.date < period.from
    });
    let physical = latest_stocktake(snapshot, location, |count| {
        count.kind != StocktakeKind::Opening && period.contains(count.date)
    });

    let mut rows: Vec<LedgerRow> = snapshot
        .active_items()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .map(|item| {
            let opening_qty = opening
                .and_then(|count| count.counted_qty(&item.id))
                .unwrap_or(Decimal::ZERO);
            let receiving_qty = movements
                .receiving
                .get(&item.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let consumption_qty = movements
                .consumption
                .get(&item.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            // Negative book balances are preserved: they flag a data
            // problem upstream, not an engine error.
            let closing_book_qty = opening_qty + receiving_qty - consumption_qty;
            // No qualifying count means physical 0, indistinguishable from
            // a counted zero.
            let physical_qty = physical
                .and_then(|count| count.counted_qty(&item.id))
                .unwrap_or(Decimal::ZERO);
            let variance_qty = physical_qty - closing_book_qty;

            LedgerRow {
                item_id: item.id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                unit: item.stock_unit.clone(),
                avg_cost: item.avg_cost,
                opening_qty,
                opening_value: opening_qty * item.avg_cost,
                receiving_qty,
                receiving_value: receiving_qty * item.avg_cost,
                consumption_qty,
                consumption_value: consumption_qty * item.avg_cost,
                closing_book_qty,
                closing_book_value: closing_book_qty * item.avg_cost,
                physical_qty,
                physical_value: physical_qty * item.avg_cost,
                variance_qty,
                variance_value: variance_qty * item.avg_cost,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        (&a.category, &a.name, &a.item_id).cmp(&(&b.category, &b.name, &b.item_id))
    });

    let mut category_totals: Vec<CategoryTotals> = Vec::new();
    let mut grand_total = LedgerTotals::default();
    for row in &rows {
        grand_total.accumulate(row);
        match category_totals.last_mut() {
            Some(last) if last.category == row.category => last.totals.accumulate(row),
            _ => {
                let mut totals = LedgerTotals::default();
                totals.accumulate(row);
                category_totals.push(CategoryTotals {
                    category: row.category.clone(),
                    totals,
                });
            }
        }
    }

    LedgerReport {
        period,
        location: location.clone(),
        rows,
        category_totals,
        grand_total,
    }
}

/// One pass over every record collection, accumulating per-item receiving
/// and consumption quantities.
fn collect_movements(
    snapshot: &Snapshot,
    period: PeriodWindow,
    location: &LocationFilter,
    resolver: &RecipeResolver<'_>,
) -> Movements {
    let mut movements = Movements::default();
    let in_scope = |status: stockledger_core::RecordStatus, date| {
        status.is_posted() && period.contains(date)
    };

    for receipt in &snapshot.purchases {
        if in_scope(receipt.status, receipt.date) && location.matches(&receipt.location_id) {
            for line in &receipt.lines {
                movements.receive(&line.item_id, line.qty);
            }
        }
    }

    for run in &snapshot.production_runs {
        if in_scope(run.status, run.date) && location.matches(&run.location_id) {
            movements.receive(&run.product_id, run.produced_qty);
            for ingredient in &run.ingredients {
                movements.consume(&ingredient.stock_item_id, ingredient.required_qty);
            }
        }
    }

    for entry in &snapshot.waste_entries {
        if in_scope(entry.status, entry.date) && location.matches(&entry.location_id) {
            for line in &entry.lines {
                movements.consume(&line.item_id, line.qty);
            }
        }
    }

    // A transfer books each side independently: destination in scope is a
    // receipt, source in scope is an issue. Under the ALL filter both sides
    // book and the movement nets to zero.
    for transfer in &snapshot.transfers {
        if in_scope(transfer.status, transfer.date) {
            if location.matches(&transfer.destination_id) {
                for line in &transfer.lines {
                    movements.receive(&line.item_id, line.qty);
                }
            }
            if location.matches(&transfer.source_id) {
                for line in &transfer.lines {
                    movements.consume(&line.item_id, line.qty);
                }
            }
        }
    }

    for ticket in &snapshot.sales {
        if in_scope(ticket.status, ticket.date) && location.matches(&ticket.location_id) {
            for line in &ticket.lines {
                for exploded in resolver.explode(line) {
                    movements.consume(&exploded.item_id, exploded.qty);
                }
            }
        }
    }

    movements
}

/// The most recent posted stocktake accepted by `accept`, under the
/// location filter.
///
/// Ties on the date resolve to the record inserted later, so re-running
/// over the same snapshot always picks the same count.
fn latest_stocktake<'a>(
    snapshot: &'a Snapshot,
    location: &LocationFilter,
    accept: impl Fn(&StocktakeCount) -> bool,
) -> Option<&'a StocktakeCount> {
    snapshot
        .stocktakes
        .iter()
        .enumerate()
        .filter(|(_, count)| {
            count.status.is_posted() && location.matches(&count.location_id) && accept(count)
        })
        .max_by_key(|(index, count)| (count.date, *index))
        .map(|(_, count)| count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stockledger_core::{
        PurchaseLine, PurchaseReceipt, RecordStatus, StockItem, StocktakeLine,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> PeriodWindow {
        PeriodWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap()
    }

    fn item(id: &str, category: &str) -> StockItem {
        StockItem {
            id: id.into(),
            name: id.to_uppercase(),
            category: category.into(),
            stock_unit: "kg".into(),
            recipe_unit: "g".into(),
            conversion_factor: dec!(1),
            avg_cost: dec!(10),
            current_stock: dec!(0),
            reorder_level: dec!(0),
            min_level: dec!(0),
            active: true,
        }
    }

    fn stocktake(
        d: NaiveDate,
        kind: StocktakeKind,
        item_id: &str,
        qty: Decimal,
    ) -> StocktakeCount {
        StocktakeCount {
            date: d,
            status: RecordStatus::Posted,
            location_id: "branch-1".into(),
            kind,
            lines: vec![StocktakeLine {
                item_id: item_id.into(),
                counted_qty: qty,
            }],
        }
    }

    #[test]
    fn opening_ties_resolve_to_later_record() {
        let mut snapshot = Snapshot {
            items: vec![item("flour", "Dry Goods")],
            ..Snapshot::default()
        };
        snapshot
            .stocktakes
            .push(stocktake(date(2024, 2, 29), StocktakeKind::Closing, "flour", dec!(80)));
        snapshot
            .stocktakes
            .push(stocktake(date(2024, 2, 29), StocktakeKind::Closing, "flour", dec!(90)));

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);
        assert_eq!(report.rows[0].opening_qty, dec!(90));
    }

    #[test]
    fn regular_counts_never_seed_the_opening() {
        let mut snapshot = Snapshot {
            items: vec![item("flour", "Dry Goods")],
            ..Snapshot::default()
        };
        snapshot
            .stocktakes
            .push(stocktake(date(2024, 2, 20), StocktakeKind::Regular, "flour", dec!(500)));
        snapshot
            .stocktakes
            .push(stocktake(date(2024, 2, 10), StocktakeKind::Opening, "flour", dec!(60)));

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);
        assert_eq!(report.rows[0].opening_qty, dec!(60));
    }

    #[test]
    fn opening_counts_never_serve_as_physical() {
        let mut snapshot = Snapshot {
            items: vec![item("flour", "Dry Goods")],
            ..Snapshot::default()
        };
        snapshot
            .stocktakes
            .push(stocktake(date(2024, 3, 10), StocktakeKind::Opening, "flour", dec!(70)));

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);
        assert_eq!(report.rows[0].physical_qty, Decimal::ZERO);
    }

    #[test]
    fn category_filter_is_exact() {
        let snapshot = Snapshot {
            items: vec![item("flour", "Dry Goods"), item("beef", "Meat")],
            ..Snapshot::default()
        };

        let report = reconcile(&snapshot, march(), &LocationFilter::All, Some("Meat"));
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].item_id, "beef");

        let none = reconcile(&snapshot, march(), &LocationFilter::All, Some("meat"));
        assert!(none.rows.is_empty());
    }

    #[test]
    fn inactive_items_are_excluded() {
        let mut inactive = item("flour", "Dry Goods");
        inactive.active = false;
        let snapshot = Snapshot {
            items: vec![inactive],
            ..Snapshot::default()
        };

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);
        assert!(report.rows.is_empty());
        assert!(report.category_totals.is_empty());
    }

    #[test]
    fn transfer_nets_to_zero_under_all_filter() {
        let mut snapshot = Snapshot {
            items: vec![item("flour", "Dry Goods")],
            ..Snapshot::default()
        };
        snapshot.transfers.push(stockledger_core::TransferMovement {
            date: date(2024, 3, 10),
            status: RecordStatus::Posted,
            source_id: "warehouse".into(),
            destination_id: "branch-1".into(),
            lines: vec![stockledger_core::TransferLine {
                item_id: "flour".into(),
                qty: dec!(25),
            }],
        });

        let all = reconcile(&snapshot, march(), &LocationFilter::All, None);
        assert_eq!(all.rows[0].receiving_qty, dec!(25));
        assert_eq!(all.rows[0].consumption_qty, dec!(25));
        assert_eq!(all.rows[0].closing_book_qty, Decimal::ZERO);

        let branch = reconcile(
            &snapshot,
            march(),
            &LocationFilter::Only("branch-1".into()),
            None,
        );
        assert_eq!(branch.rows[0].receiving_qty, dec!(25));
        assert_eq!(branch.rows[0].consumption_qty, Decimal::ZERO);

        let warehouse = reconcile(
            &snapshot,
            march(),
            &LocationFilter::Only("warehouse".into()),
            None,
        );
        assert_eq!(warehouse.rows[0].receiving_qty, Decimal::ZERO);
        assert_eq!(warehouse.rows[0].consumption_qty, dec!(25));
    }

    #[test]
    fn production_receives_product_and_consumes_ingredients() {
        let mut snapshot = Snapshot {
            items: vec![item("dough", "Prepared"), item("flour", "Dry Goods")],
            ..Snapshot::default()
        };
        snapshot.production_runs.push(stockledger_core::ProductionRun {
            date: date(2024, 3, 12),
            status: RecordStatus::Posted,
            location_id: "branch-1".into(),
            product_id: "dough".into(),
            produced_qty: dec!(8),
            total_cost: dec!(12),
            ingredients: vec![stockledger_core::IngredientLine {
                stock_item_id: "flour".into(),
                required_qty: dec!(5),
            }],
        });

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);
        let dough = report.rows.iter().find(|r| r.item_id == "dough").unwrap();
        let flour = report.rows.iter().find(|r| r.item_id == "flour").unwrap();
        assert_eq!(dough.receiving_qty, dec!(8));
        assert_eq!(flour.consumption_qty, dec!(5));
    }

    #[test]
    fn rows_group_by_category_with_subtotals() {
        let mut snapshot = Snapshot {
            items: vec![
                item("beef", "Meat"),
                item("flour", "Dry Goods"),
                item("rice", "Dry Goods"),
            ],
            ..Snapshot::default()
        };
        snapshot.purchases.push(PurchaseReceipt {
            date: date(2024, 3, 3),
            status: RecordStatus::Posted,
            location_id: "branch-1".into(),
            lines: vec![
                PurchaseLine {
                    item_id: "flour".into(),
                    qty: dec!(10),
                    unit_cost: dec!(9),
                },
                PurchaseLine {
                    item_id: "rice".into(),
                    qty: dec!(4),
                    unit_cost: dec!(11),
                },
            ],
        });

        let report = reconcile(&snapshot, march(), &LocationFilter::All, None);

        // Categories sort alphabetically, items by name inside a category.
        let order: Vec<&str> = report.rows.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(order, vec!["flour", "rice", "beef"]);

        assert_eq!(report.category_totals.len(), 2);
        assert_eq!(report.category_totals[0].category, "Dry Goods");
        assert_eq!(report.category_totals[0].totals.receiving_qty, dec!(14));
        assert_eq!(report.category_totals[1].category, "Meat");
        assert_eq!(report.category_totals[1].totals.receiving_qty, Decimal::ZERO);
        assert_eq!(report.grand_total.receiving_qty, dec!(14));
        assert_eq!(report.grand_total.receiving_value, dec!(140));
    }
}
