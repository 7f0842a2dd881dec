//! Ledger reconciliation engine.
//!
//! This crate derives, for any stock item / location / period, the full
//! reconciliation tuple: opening balance, receipts, consumption, book
//! balance, physical count, and variance. It is a pure computation over an
//! immutable [`Snapshot`](stockledger_core::Snapshot): no I/O, no clock, no
//! shared state, so identical inputs always reproduce identical output.
//!
//! - [`RecipeResolver`] converts sold menu-item lines into raw-ingredient
//!   consumption through the bill of materials
//! - [`reconcile`] produces a [`LedgerReport`] with per-item rows, category
//!   subtotals, and a grand total
//!
//! # Example
//!
//! ```
//! use stockledger_core::{LocationFilter, PeriodWindow, Snapshot};
//! use stockledger_engine::reconcile;
//! use chrono::NaiveDate;
//!
//! let snapshot = Snapshot::default();
//! let period = PeriodWindow::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//! ).unwrap();
//!
//! let report = reconcile(&snapshot, period, &LocationFilter::All, None);
//! assert!(report.rows.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod explode;
pub mod ledger;

pub use explode::{ExplodedConsumption, RecipeResolver};
pub use ledger::{reconcile, CategoryTotals, LedgerReport, LedgerRow, LedgerTotals};
