//! Location filtering.
//!
//! Every report is scoped to either a single branch/warehouse or to all
//! locations. [`LocationFilter::matches`] is the one place that rule is
//! defined; downstream computations call it rather than re-deriving the
//! comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::LocationRef;

/// Scope of a computation: all locations, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFilter {
    /// Match every location.
    #[default]
    All,
    /// Match exactly this location id.
    Only(String),
}

impl LocationFilter {
    /// Whether `location_id` is in scope.
    #[must_use]
    pub fn matches(&self, location_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == location_id,
        }
    }

    /// Whether any end of a record's location aspect is in scope.
    ///
    /// For a movement this is true when either end matches; direction-aware
    /// booking (receipt at destination, issue at source) stays with the
    /// ledger engine, which tests each end individually via [`Self::matches`].
    #[must_use]
    pub fn matches_ref(&self, location: &LocationRef) -> bool {
        match location {
            LocationRef::At(id) => self.matches(id),
            LocationRef::Movement {
                source,
                destination,
            } => self.matches(source) || self.matches(destination),
        }
    }

    /// Whether this is the ALL sentinel.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for LocationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty location filter".to_string());
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}
