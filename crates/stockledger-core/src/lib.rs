//! Core types for stockledger
//!
//! This crate provides the fundamental types used throughout the stockledger
//! project:
//!
//! - [`StockItem`] - A raw-material stock item from master data
//! - [`Recipe`] - The bill of materials behind a sold menu item
//! - [`TransactionRecord`] - All transaction record kinds (purchases,
//!   production runs, waste, transfers, sales, stocktakes)
//! - [`RecordStatus`] - Draft/Posted lifecycle status
//! - [`PeriodWindow`] - An inclusive calendar-date reporting window
//! - [`LocationFilter`] - Branch/warehouse filtering with an ALL sentinel
//! - [`Snapshot`] - The read-only repository snapshot fed to computations
//!
//! # Example
//!
//! ```
//! use stockledger_core::{LocationFilter, PeriodWindow, RecordStatus};
//! use chrono::NaiveDate;
//!
//! let period = PeriodWindow::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//! ).unwrap();
//! assert_eq!(period.day_count(), 30);
//!
//! let filter = LocationFilter::Only("branch-1".into());
//! assert!(filter.matches("branch-1"));
//! assert!(!filter.matches("branch-2"));
//! assert!(LocationFilter::All.matches("branch-2"));
//!
//! assert!(RecordStatus::Posted.is_posted());
//! assert!(!RecordStatus::Draft.is_posted());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod filter;
pub mod item;
pub mod period;
pub mod recipe;
pub mod record;
pub mod snapshot;

pub use filter::LocationFilter;
pub use item::{Location, StockItem};
pub use period::{PeriodError, PeriodWindow};
pub use recipe::{Recipe, RecipeLine};
pub use record::{
    IngredientLine, LocationRef, ProductionRun, PurchaseLine, PurchaseReceipt, RecordStatus,
    SaleLine, SaleTicket, StocktakeCount, StocktakeKind, StocktakeLine, TransactionRecord,
    TransferLine, TransferMovement, WasteEntry, WasteLine,
};
pub use snapshot::Snapshot;

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
