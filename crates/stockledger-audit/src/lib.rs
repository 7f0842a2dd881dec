//! Variance aggregation and data-quality checks.
//!
//! Two concerns live here, both downstream of the reconciliation engine:
//!
//! - [`summarize`] rolls a ledger report into the audit figures (grand
//!   totals, discrepancy count, total variance value) that summary views
//!   render without re-deriving the ledger
//! - [`check_snapshot`] / [`check_report`] scan for data-quality problems
//!   and report them as coded [`Finding`]s
//!
//! # Finding Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | R1001 | Record line references an unknown stock item |
//! | R1002 | Sale of a menu item with no recipe |
//! | R1003 | Recipe ingredient references an unknown stock item |
//! | R1004 | Record references a location missing from master data |
//! | C2001 | Conversion factor not positive, defaulted to 1 |
//! | B3001 | Negative closing book balance |
//! | B3002 | Variance above the counting epsilon |
//! | S4001 | Current stock at or below reorder level |
//! | S4002 | Current stock at or below minimum level |
//!
//! Findings never abort a computation: the engine always produces a report,
//! and the checks explain what to distrust about it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use stockledger_core::{LocationRef, Snapshot};
use stockledger_engine::{LedgerReport, LedgerRow, LedgerTotals};

/// Data-quality finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FindingCode {
    // === Reference findings (R1xxx) ===
    /// R1001: Record line references an unknown stock item.
    UnknownStockItem,
    /// R1002: Sale of a menu item with no recipe.
    MissingRecipe,
    /// R1003: Recipe ingredient references an unknown stock item.
    UnknownIngredient,
    /// R1004: Record references a location missing from master data.
    UnknownLocation,

    // === Conversion findings (C2xxx) ===
    /// C2001: Conversion factor not positive, defaulted to 1.
    DefaultedConversionFactor,

    // === Balance findings (B3xxx) ===
    /// B3001: Negative closing book balance.
    NegativeBookBalance,
    /// B3002: Variance above the counting epsilon.
    VarianceAboveEpsilon,

    // === Stock level findings (S4xxx) ===
    /// S4001: Current stock at or below reorder level.
    BelowReorderLevel,
    /// S4002: Current stock at or below minimum level.
    BelowMinimumLevel,
}

impl FindingCode {
    /// Get the finding code string (e.g., "R1001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownStockItem => "R1001",
            Self::MissingRecipe => "R1002",
            Self::UnknownIngredient => "R1003",
            Self::UnknownLocation => "R1004",
            Self::DefaultedConversionFactor => "C2001",
            Self::NegativeBookBalance => "B3001",
            Self::VarianceAboveEpsilon => "B3002",
            Self::BelowReorderLevel => "S4001",
            Self::BelowMinimumLevel => "S4002",
        }
    }

    /// Get the severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownStockItem
            | Self::MissingRecipe
            | Self::UnknownIngredient
            | Self::DefaultedConversionFactor
            | Self::NegativeBookBalance
            | Self::BelowMinimumLevel => Severity::Warning,
            Self::UnknownLocation | Self::VarianceAboveEpsilon | Self::BelowReorderLevel => {
                Severity::Info
            }
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Input is unusable. Currently unused: the engine stays total over
    /// well-typed snapshots.
    Error,
    /// Figures are produced but suspect.
    Warning,
    /// Worth a look, nothing wrong.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Finding code.
    pub code: FindingCode,
    /// Human-readable message.
    pub message: String,
    /// The stock item involved, when there is one.
    pub item_id: Option<String>,
    /// The record date involved, when there is one.
    pub date: Option<NaiveDate>,
}

impl Finding {
    /// Create a finding without item or date context.
    #[must_use]
    pub fn new(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            item_id: None,
            date: None,
        }
    }

    /// Attach the stock item involved.
    #[must_use]
    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// Attach the record date involved.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Severity shorthand.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.code.severity()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The audit figures for one ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Number of ledger rows audited.
    pub item_count: usize,
    /// Rows whose absolute quantity variance exceeds the epsilon.
    pub discrepancy_count: usize,
    /// Sum of variance values across every row.
    pub total_variance_value: Decimal,
    /// Column sums over every row.
    pub grand_total: LedgerTotals,
}

/// Tolerance below which a quantity variance counts as clean.
///
/// 0.001 of a stock unit, matching the counting precision of the scales in
/// the field.
#[must_use]
pub fn variance_epsilon() -> Decimal {
    Decimal::new(1, 3)
}

/// Roll a ledger report into its audit figures.
#[must_use]
pub fn summarize(report: &LedgerReport) -> AuditSummary {
    AuditSummary {
        item_count: report.rows.len(),
        discrepancy_count: discrepancies(report).len(),
        total_variance_value: report.grand_total.variance_value,
        grand_total: report.grand_total.clone(),
    }
}

/// The rows whose physical count disagrees with the book balance beyond the
/// epsilon.
#[must_use]
pub fn discrepancies(report: &LedgerReport) -> Vec<&LedgerRow> {
    let epsilon = variance_epsilon();
    report
        .rows
        .iter()
        .filter(|row| row.variance_qty.abs() > epsilon)
        .collect()
}

/// Scan a snapshot for referential and master-data problems.
#[must_use]
pub fn check_snapshot(snapshot: &Snapshot) -> Vec<Finding> {
    let mut findings = Vec::new();
    let known: HashSet<&str> = snapshot.items.iter().map(|i| i.id.as_str()).collect();
    let flag_unknown = |item_id: &str, kind: &str, date: NaiveDate, findings: &mut Vec<Finding>| {
        if !known.contains(item_id) {
            findings.push(
                Finding::new(
                    FindingCode::UnknownStockItem,
                    format!("{kind} line references unknown stock item '{item_id}'"),
                )
                .with_item(item_id)
                .with_date(date),
            );
        }
    };

    for item in &snapshot.items {
        if item.conversion_factor <= Decimal::ZERO {
            findings.push(
                Finding::new(
                    FindingCode::DefaultedConversionFactor,
                    format!(
                        "item '{}' has conversion factor {}, treated as 1",
                        item.id, item.conversion_factor
                    ),
                )
                .with_item(&item.id),
            );
        }
        if !item.active {
            continue;
        }
        if item.current_stock <= item.min_level && item.min_level > Decimal::ZERO {
            findings.push(
                Finding::new(
                    FindingCode::BelowMinimumLevel,
                    format!(
                        "item '{}' stock {} is at or below minimum level {}",
                        item.id, item.current_stock, item.min_level
                    ),
                )
                .with_item(&item.id),
            );
        } else if item.current_stock <= item.reorder_level && item.reorder_level > Decimal::ZERO {
            findings.push(
                Finding::new(
                    FindingCode::BelowReorderLevel,
                    format!(
                        "item '{}' stock {} is at or below reorder level {}",
                        item.id, item.current_stock, item.reorder_level
                    ),
                )
                .with_item(&item.id),
            );
        }
    }

    for recipe in &snapshot.recipes {
        for ingredient in &recipe.ingredients {
            if !known.contains(ingredient.stock_item_id.as_str()) {
                findings.push(
                    Finding::new(
                        FindingCode::UnknownIngredient,
                        format!(
                            "recipe '{}' uses unknown stock item '{}'",
                            recipe.menu_item_id, ingredient.stock_item_id
                        ),
                    )
                    .with_item(&ingredient.stock_item_id),
                );
            }
        }
    }

    for receipt in &snapshot.purchases {
        for line in &receipt.lines {
            flag_unknown(&line.item_id, "purchase", receipt.date, &mut findings);
        }
    }
    for run in &snapshot.production_runs {
        flag_unknown(&run.product_id, "production", run.date, &mut findings);
        for ingredient in &run.ingredients {
            flag_unknown(&ingredient.stock_item_id, "production", run.date, &mut findings);
        }
    }
    for entry in &snapshot.waste_entries {
        for line in &entry.lines {
            flag_unknown(&line.item_id, "waste", entry.date, &mut findings);
        }
    }
    for transfer in &snapshot.transfers {
        for line in &transfer.lines {
            flag_unknown(&line.item_id, "transfer", transfer.date, &mut findings);
        }
    }
    for count in &snapshot.stocktakes {
        for line in &count.lines {
            flag_unknown(&line.item_id, "stocktake", count.date, &mut findings);
        }
    }

    // Location checks only make sense when location master data is present;
    // an empty master list means the snapshot chose not to carry it.
    let locations: HashSet<&str> = snapshot
        .branches
        .iter()
        .chain(&snapshot.warehouses)
        .map(|l| l.id.as_str())
        .collect();
    if !locations.is_empty() {
        for record in snapshot.records() {
            let ends = match record.location_ref() {
                LocationRef::At(id) => vec![id],
                LocationRef::Movement {
                    source,
                    destination,
                } => vec![source, destination],
            };
            for id in ends {
                if !locations.contains(id.as_str()) {
                    findings.push(
                        Finding::new(
                            FindingCode::UnknownLocation,
                            format!(
                                "{} record references unknown location '{id}'",
                                record.type_name()
                            ),
                        )
                        .with_date(record.date()),
                    );
                }
            }
        }
    }

    let recipes: HashSet<&str> = snapshot
        .recipes
        .iter()
        .map(|r| r.menu_item_id.as_str())
        .collect();
    let mut flagged_menu_items: HashSet<&str> = HashSet::new();
    for ticket in &snapshot.sales {
        for line in &ticket.lines {
            if !recipes.contains(line.menu_item_id.as_str())
                && flagged_menu_items.insert(line.menu_item_id.as_str())
            {
                findings.push(
                    Finding::new(
                        FindingCode::MissingRecipe,
                        format!(
                            "menu item '{}' is sold but has no recipe; its sales consume nothing",
                            line.menu_item_id
                        ),
                    )
                    .with_date(ticket.date),
                );
            }
        }
    }

    findings
}

/// Scan a computed report for balance-level problems.
#[must_use]
pub fn check_report(report: &LedgerReport) -> Vec<Finding> {
    let epsilon = variance_epsilon();
    let mut findings = Vec::new();

    for row in &report.rows {
        if row.closing_book_qty < Decimal::ZERO {
            findings.push(
                Finding::new(
                    FindingCode::NegativeBookBalance,
                    format!(
                        "item '{}' has negative book balance {} {}",
                        row.item_id, row.closing_book_qty, row.unit
                    ),
                )
                .with_item(&row.item_id),
            );
        }
        if row.variance_qty.abs() > epsilon {
            findings.push(
                Finding::new(
                    FindingCode::VarianceAboveEpsilon,
                    format!(
                        "item '{}' variance {} {} against the physical count",
                        row.item_id, row.variance_qty, row.unit
                    ),
                )
                .with_item(&row.item_id),
            );
        }
    }

    findings
}
