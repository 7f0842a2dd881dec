//! Transaction record types.
//!
//! Six record kinds move stock in and out of a location:
//!
//! - [`PurchaseReceipt`] - Goods received from a supplier
//! - [`ProductionRun`] - In-house production consuming ingredients and
//!   producing a finished item
//! - [`WasteEntry`] - Spoilage, breakage, and other write-offs
//! - [`TransferMovement`] - Stock moved between two locations
//! - [`SaleTicket`] - Point-of-sale ticket lines (consumption via recipes)
//! - [`StocktakeCount`] - A physical count of on-hand stock
//!
//! Every kind carries the shared capability set `{date, status, location}`.
//! [`TransactionRecord`] is the tagged union over all kinds and exposes that
//! set uniformly, so filtering logic is written once rather than per kind.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a transaction record.
///
/// Only `Posted` records contribute to computed balances; `Draft` records
/// are visible in listings but never affect a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Record is being edited and does not affect balances.
    #[default]
    Draft,
    /// Record is final and participates in every computation.
    Posted,
}

impl RecordStatus {
    /// The single posted-status predicate used by every computation.
    #[must_use]
    pub const fn is_posted(self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "posted" => Ok(Self::Posted),
            _ => Err(format!("unknown record status: {s}")),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Posted => write!(f, "posted"),
        }
    }
}

/// The location aspect of a record.
///
/// Most kinds occur at a single branch or warehouse. A transfer is a
/// movement with two ends; which end is relevant depends on the direction
/// being computed (receipts at the destination, issues at the source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRef {
    /// The record occurred at one location.
    At(String),
    /// The record moved stock from `source` to `destination`.
    Movement {
        /// Sending location.
        source: String,
        /// Receiving location.
        destination: String,
    },
}

/// One line of a purchase receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// The stock item received.
    pub item_id: String,
    /// Quantity received, in stock units.
    pub qty: Decimal,
    /// Cost per stock unit on this receipt.
    pub unit_cost: Decimal,
}

/// Goods received from a supplier at a branch or warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Receipt date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Receiving branch or warehouse id.
    pub location_id: String,
    /// Received lines.
    pub lines: Vec<PurchaseLine>,
}

/// One ingredient consumed by a production run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// The stock item consumed.
    pub stock_item_id: String,
    /// Quantity consumed, in stock units.
    pub required_qty: Decimal,
}

/// An in-house production run.
///
/// Consumes ingredient lines and produces `produced_qty` of the product
/// item, so the same run contributes to consumption (ingredients) and to
/// receiving (the product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRun {
    /// Production date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Producing branch id.
    pub location_id: String,
    /// The stock item produced.
    pub product_id: String,
    /// Quantity produced, in stock units.
    pub produced_qty: Decimal,
    /// Total cost of the run.
    pub total_cost: Decimal,
    /// Ingredients consumed by the run.
    pub ingredients: Vec<IngredientLine>,
}

/// One line of a waste entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteLine {
    /// The stock item written off.
    pub item_id: String,
    /// Quantity written off, in stock units.
    pub qty: Decimal,
    /// Cost per stock unit at write-off time.
    pub unit_cost: Decimal,
    /// Free-text reason ("expired", "dropped", ...).
    pub reason: String,
}

/// Spoilage and other write-offs at a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteEntry {
    /// Write-off date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Branch id.
    pub location_id: String,
    /// Written-off lines.
    pub lines: Vec<WasteLine>,
}

/// One line of a transfer movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    /// The stock item moved.
    pub item_id: String,
    /// Quantity moved, in stock units.
    pub qty: Decimal,
}

/// Stock moved between two locations.
///
/// A transfer is an issue at the source and a receipt at the destination;
/// the ledger books each side only when that side matches the location
/// filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMovement {
    /// Movement date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Sending location id.
    pub source_id: String,
    /// Receiving location id.
    pub destination_id: String,
    /// Moved lines.
    pub lines: Vec<TransferLine>,
}

/// One line of a sale ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// The menu item sold.
    pub menu_item_id: String,
    /// Units sold.
    pub qty: Decimal,
}

/// A point-of-sale ticket.
///
/// Sale lines reference menu items, not stock items; consumption is derived
/// by exploding each line through the menu item's recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTicket {
    /// Ticket date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Selling branch id.
    pub location_id: String,
    /// Sold lines.
    pub lines: Vec<SaleLine>,
}

/// The role of a stocktake count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StocktakeKind {
    /// Seeds the opening balance of the following period.
    Opening,
    /// Closes a period; also seeds later openings.
    Closing,
    /// An ad-hoc count during a period.
    Regular,
}

impl fmt::Display for StocktakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "opening"),
            Self::Closing => write!(f, "closing"),
            Self::Regular => write!(f, "regular"),
        }
    }
}

/// One counted line of a stocktake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StocktakeLine {
    /// The counted stock item.
    pub item_id: String,
    /// Physically counted quantity, in stock units.
    pub counted_qty: Decimal,
}

/// A physical count of on-hand stock at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StocktakeCount {
    /// Count date.
    pub date: NaiveDate,
    /// Draft/Posted status.
    pub status: RecordStatus,
    /// Counted branch or warehouse id.
    pub location_id: String,
    /// Opening/closing/regular role.
    pub kind: StocktakeKind,
    /// Counted lines.
    pub lines: Vec<StocktakeLine>,
}

impl StocktakeCount {
    /// The counted quantity for an item, or `None` when the item does not
    /// appear in this count.
    #[must_use]
    pub fn counted_qty(&self, item_id: &str) -> Option<Decimal> {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.counted_qty)
    }
}

/// All transaction record kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionRecord {
    /// Goods received from a supplier.
    Purchase(PurchaseReceipt),
    /// In-house production run.
    Production(ProductionRun),
    /// Spoilage and write-offs.
    Waste(WasteEntry),
    /// Inter-location movement.
    Transfer(TransferMovement),
    /// Point-of-sale ticket.
    Sale(SaleTicket),
    /// Physical stock count.
    Stocktake(StocktakeCount),
}

impl TransactionRecord {
    /// Get the date of this record.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Purchase(r) => r.date,
            Self::Production(r) => r.date,
            Self::Waste(r) => r.date,
            Self::Transfer(r) => r.date,
            Self::Sale(r) => r.date,
            Self::Stocktake(r) => r.date,
        }
    }

    /// Get the Draft/Posted status of this record.
    #[must_use]
    pub const fn status(&self) -> RecordStatus {
        match self {
            Self::Purchase(r) => r.status,
            Self::Production(r) => r.status,
            Self::Waste(r) => r.status,
            Self::Transfer(r) => r.status,
            Self::Sale(r) => r.status,
            Self::Stocktake(r) => r.status,
        }
    }

    /// Whether this record participates in computed balances.
    #[must_use]
    pub const fn is_posted(&self) -> bool {
        self.status().is_posted()
    }

    /// Get the location aspect of this record.
    #[must_use]
    pub fn location_ref(&self) -> LocationRef {
        match self {
            Self::Purchase(r) => LocationRef::At(r.location_id.clone()),
            Self::Production(r) => LocationRef::At(r.location_id.clone()),
            Self::Waste(r) => LocationRef::At(r.location_id.clone()),
            Self::Transfer(r) => LocationRef::Movement {
                source: r.source_id.clone(),
                destination: r.destination_id.clone(),
            },
            Self::Sale(r) => LocationRef::At(r.location_id.clone()),
            Self::Stocktake(r) => LocationRef::At(r.location_id.clone()),
        }
    }

    /// Get the record kind name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Purchase(_) => "purchase",
            Self::Production(_) => "production",
            Self::Waste(_) => "waste",
            Self::Transfer(_) => "transfer",
            Self::Sale(_) => "sale",
            Self::Stocktake(_) => "stocktake",
        }
    }
}

impl From<PurchaseReceipt> for TransactionRecord {
    fn from(r: PurchaseReceipt) -> Self {
        Self::Purchase(r)
    }
}

impl From<ProductionRun> for TransactionRecord {
    fn from(r: ProductionRun) -> Self {
        Self::Production(r)
    }
}

impl From<WasteEntry> for TransactionRecord {
    fn from(r: WasteEntry) -> Self {
        Self::Waste(r)
    }
}

impl From<TransferMovement> for TransactionRecord {
    fn from(r: TransferMovement) -> Self {
        Self::Transfer(r)
    }
}

impl From<SaleTicket> for TransactionRecord {
    fn from(r: SaleTicket) -> Self {
        Self::Sale(r)
    }
}

impl From<StocktakeCount> for TransactionRecord {
    fn from(r: StocktakeCount) -> Self {
        Self::Stocktake(r)
    }
}
