//! Recipe (bill of materials) types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ingredient of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// The stock item consumed.
    pub stock_item_id: String,
    /// Quantity per unit sold, in the item's recipe unit.
    pub qty: Decimal,
}

/// The bill of materials for one menu item.
///
/// There is one recipe per menu item; selling `n` units of the menu item
/// consumes `n * qty / conversion_factor` stock units of each ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// The menu item this recipe produces.
    pub menu_item_id: String,
    /// Ingredients in declaration order.
    pub ingredients: Vec<RecipeLine>,
}

impl Recipe {
    /// Create an empty recipe for a menu item.
    #[must_use]
    pub fn new(menu_item_id: impl Into<String>) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            ingredients: Vec::new(),
        }
    }

    /// Append an ingredient line.
    #[must_use]
    pub fn with_ingredient(mut self, stock_item_id: impl Into<String>, qty: Decimal) -> Self {
        self.ingredients.push(RecipeLine {
            stock_item_id: stock_item_id.into(),
            qty,
        });
        self
    }
}
