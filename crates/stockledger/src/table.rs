//! Plain-text table rendering helpers.
//!
//! Reports render through a `Write` sink so tests can capture output; these
//! helpers keep the column conventions in one place.

use rust_decimal::Decimal;

/// Decimal places shown for quantities.
pub const QTY_DP: u32 = 2;
/// Decimal places shown for monetary values.
pub const VALUE_DP: u32 = 2;

/// Format a quantity for display.
#[must_use]
pub fn qty(value: Decimal) -> String {
    // Round first (known midpoint strategy), then pad to a fixed width.
    format!("{:.prec$}", value.round_dp(QTY_DP), prec = QTY_DP as usize)
}

/// Format a monetary value for display.
#[must_use]
pub fn value(value: Decimal) -> String {
    format!("{:.prec$}", value.round_dp(VALUE_DP), prec = VALUE_DP as usize)
}

/// A horizontal rule sized to a header line.
#[must_use]
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Truncate a name to a column width, marking the cut with an ellipsis.
#[must_use]
pub fn clip(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let cut: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}
