//! Reporting period windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error constructing a period window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The end date precedes the start date.
    #[error("period end {to} precedes start {from}")]
    Inverted {
        /// Requested start date.
        from: NaiveDate,
        /// Requested end date.
        to: NaiveDate,
    },
}

/// An inclusive `[from, to]` calendar-date range.
///
/// # Examples
///
/// ```
/// use stockledger_core::PeriodWindow;
/// use chrono::NaiveDate;
///
/// let period = PeriodWindow::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// ).unwrap();
///
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// assert_eq!(period.day_count(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First day of the period (inclusive).
    pub from: NaiveDate,
    /// Last day of the period (inclusive).
    pub to: NaiveDate,
}

impl PeriodWindow {
    /// Create a window, rejecting inverted ranges.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, PeriodError> {
        if to < from {
            return Err(PeriodError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// A single-day window.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// Whether `date` falls inside the window (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Days spanned by the window, floored at 1.
    ///
    /// The floor keeps rate calculations (daily usage, days of inventory)
    /// away from division by zero on single-day windows.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.to - self.from).num_days().max(1)
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = PeriodWindow::new(date(2024, 3, 31), date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::Inverted { .. }));
    }

    #[test]
    fn day_count_floors_at_one() {
        assert_eq!(PeriodWindow::single_day(date(2024, 3, 1)).day_count(), 1);
        assert_eq!(
            PeriodWindow::new(date(2024, 3, 1), date(2024, 3, 31))
                .unwrap()
                .day_count(),
            30
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let period = PeriodWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert!(period.contains(date(2024, 3, 1)));
        assert!(period.contains(date(2024, 3, 31)));
        assert!(!period.contains(date(2024, 2, 29)));
    }
}
