//! ABC/Pareto classification.
//!
//! Items are ranked by consumption value and bucketed: class A carries the
//! top ~70% of value, B the next ~20%, C the tail. The walk is over a
//! stable value-descending sort, so equal-value items keep their ledger
//! order and the classification is reproducible.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use stockledger_engine::LedgerRow;

/// Pareto value class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbcClass {
    /// Top ~70% of consumption value.
    A,
    /// Next ~20%.
    B,
    /// Remaining tail.
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

/// One classified row, in usage-value-descending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbcRow {
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
    /// Assigned class.
    pub class: AbcClass,
}

/// Class-A boundary on the cumulative share walk.
const CLASS_A_CEILING: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
/// Class-B boundary on the cumulative share walk.
const CLASS_B_CEILING: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Classify ledger rows into ABC classes by consumption value.
///
/// The returned rows are sorted by usage value, descending, with ties
/// keeping their input order. When the total usage value is zero there is
/// nothing to rank: every row is class C with a zero share, by convention.
#[must_use]
pub fn classify_abc(rows: &[LedgerRow]) -> Vec<AbcRow> {
    let mut ranked: Vec<&LedgerRow> = rows.iter().collect();
    // Stable sort: descending by usage value, ties keep ledger order.
    ranked.sort_by(|a, b| b.consumption_value.cmp(&a.consumption_value));

    let total: Decimal = ranked.iter().map(|r| r.consumption_value).sum();

    let mut cumulative = Decimal::ZERO;
    ranked
        .into_iter()
        .map(|row| {
            let (share, class) = if total.is_zero() {
                (Decimal::ZERO, AbcClass::C)
            } else {
                cumulative += row.consumption_value;
                let share = cumulative / total * Decimal::ONE_HUNDRED;
                let class = if share <= CLASS_A_CEILING {
                    AbcClass::A
                } else if share <= CLASS_B_CEILING {
                    AbcClass::B
                } else {
                    AbcClass::C
                };
                (share, class)
            };

            AbcRow {
                item_id: row.item_id.clone(),
                name: row.name.clone(),
                category: row.category.clone(),
                consumption_qty: row.consumption_qty,
                usage_value: row.consumption_value,
                cumulative_share: share,
                class,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(item_id: &str, consumption_qty: Decimal, avg_cost: Decimal) -> LedgerRow {
        let consumption_value = consumption_qty * avg_cost;
        LedgerRow {
            item_id: item_id.into(),
            name: item_id.to_uppercase(),
            category: "Kitchen".into(),
            unit: "kg".into(),
            avg_cost,
            opening_qty: Decimal::ZERO,
            opening_value: Decimal::ZERO,
            receiving_qty: Decimal::ZERO,
            receiving_value: Decimal::ZERO,
            consumption_qty,
            consumption_value,
            closing_book_qty: Decimal::ZERO,
            closing_book_value: Decimal::ZERO,
            physical_qty: Decimal::ZERO,
            physical_value: Decimal::ZERO,
            variance_qty: Decimal::ZERO,
            variance_value: Decimal::ZERO,
        }
    }

    #[test]
    fn classes_follow_cumulative_share() {
        // Usage values 70 / 20 / 10 give shares 70, 90, 100.
        let rows = vec![
            row("a", dec!(70), dec!(1)),
            row("b", dec!(20), dec!(1)),
            row("c", dec!(10), dec!(1)),
        ];

        let classified = classify_abc(&rows);
        assert_eq!(classified[0].class, AbcClass::A);
        assert_eq!(classified[0].cumulative_share, dec!(70));
        assert_eq!(classified[1].class, AbcClass::B);
        assert_eq!(classified[1].cumulative_share, dec!(90));
        assert_eq!(classified[2].class, AbcClass::C);
        assert_eq!(classified[2].cumulative_share, dec!(100));
    }

    #[test]
    fn sorts_descending_by_usage_value() {
        let rows = vec![
            row("small", dec!(1), dec!(1)),
            row("large", dec!(100), dec!(1)),
        ];

        let classified = classify_abc(&rows);
        assert_eq!(classified[0].item_id, "large");
        assert_eq!(classified[1].item_id, "small");
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            row("first", dec!(5), dec!(1)),
            row("second", dec!(5), dec!(1)),
        ];

        let classified = classify_abc(&rows);
        assert_eq!(classified[0].item_id, "first");
        assert_eq!(classified[1].item_id, "second");
    }

    #[test]
    fn zero_total_means_everything_is_class_c() {
        let rows = vec![row("a", dec!(0), dec!(1)), row("b", dec!(0), dec!(5))];

        let classified = classify_abc(&rows);
        for row in &classified {
            assert_eq!(row.class, AbcClass::C);
            assert_eq!(row.cumulative_share, Decimal::ZERO);
        }
    }

    #[test]
    fn classification_is_a_partition_with_monotone_share() {
        let rows: Vec<LedgerRow> = [38, 5, 120, 5, 0, 260, 77, 12]
            .iter()
            .enumerate()
            .map(|(i, qty)| row(&format!("item-{i}"), Decimal::from(*qty), dec!(1.5)))
            .collect();

        let classified = classify_abc(&rows);

        // Every input row comes back exactly once.
        assert_eq!(classified.len(), rows.len());
        let mut ids: Vec<&str> = classified.iter().map(|r| r.item_id.as_str()).collect();
        ids.sort_unstable();
        let mut expected: Vec<String> = (0..rows.len()).map(|i| format!("item-{i}")).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());

        // Cumulative share never decreases along the ranking.
        for pair in classified.windows(2) {
            assert!(pair[0].cumulative_share <= pair[1].cumulative_share);
            assert!(pair[0].usage_value >= pair[1].usage_value);
        }
        assert_eq!(classified.last().unwrap().cumulative_share, dec!(100));
    }

    #[test]
    fn single_item_owns_the_whole_share() {
        let classified = classify_abc(&[row("only", dec!(3), dec!(7))]);
        assert_eq!(classified.len(), 1);
        // 100% share lands beyond both ceilings.
        assert_eq!(classified[0].class, AbcClass::C);
        assert_eq!(classified[0].cumulative_share, dec!(100));
    }
}
