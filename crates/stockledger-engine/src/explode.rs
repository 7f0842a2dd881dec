//! Recipe explosion.
//!
//! Sale tickets reference menu items; the ledger tracks stock items. The
//! [`RecipeResolver`] bridges the two: a sold line explodes through the menu
//! item's bill of materials into per-ingredient stock-unit quantities.

use rust_decimal::Decimal;
use std::collections::HashMap;

use stockledger_core::{Recipe, SaleLine, StockItem};

/// One exploded ingredient consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplodedConsumption {
    /// The consumed stock item.
    pub item_id: String,
    /// Consumed quantity, in stock units.
    pub qty: Decimal,
}

/// Resolves sold menu-item lines into raw-ingredient consumption.
///
/// Indexes are built once per computation; lookups are by id. Missing
/// references degrade to zero contribution rather than failing: a sale of a
/// menu item with no recipe explodes to nothing, and an ingredient whose
/// stock item is unknown is skipped.
#[derive(Debug)]
pub struct RecipeResolver<'a> {
    recipes: HashMap<&'a str, &'a Recipe>,
    items: HashMap<&'a str, &'a StockItem>,
}

impl<'a> RecipeResolver<'a> {
    /// Build a resolver over master data.
    ///
    /// When duplicate recipes exist for a menu item, the last one wins,
    /// matching the one-recipe-per-menu-item invariant of the master data.
    #[must_use]
    pub fn new(recipes: &'a [Recipe], items: &'a [StockItem]) -> Self {
        Self {
            recipes: recipes
                .iter()
                .map(|r| (r.menu_item_id.as_str(), r))
                .collect(),
            items: items.iter().map(|i| (i.id.as_str(), i)).collect(),
        }
    }

    /// Explode one sold line into stock-unit ingredient quantities.
    ///
    /// For a sale of `qty` units, each ingredient contributes
    /// `qty * ingredient_qty / conversion_factor` stock units, where the
    /// conversion factor is the item's recipe-unit to stock-unit ratio
    /// (defaulted to 1 when not positive).
    #[must_use]
    pub fn explode(&self, line: &SaleLine) -> Vec<ExplodedConsumption> {
        let Some(recipe) = self.recipes.get(line.menu_item_id.as_str()) else {
            return Vec::new();
        };

        recipe
            .ingredients
            .iter()
            .filter_map(|ingredient| {
                let item = self.items.get(ingredient.stock_item_id.as_str())?;
                Some(ExplodedConsumption {
                    item_id: item.id.clone(),
                    qty: line.qty * ingredient.qty / item.effective_conversion_factor(),
                })
            })
            .collect()
    }

    /// Whether a recipe exists for a menu item.
    #[must_use]
    pub fn has_recipe(&self, menu_item_id: &str) -> bool {
        self.recipes.contains_key(menu_item_id)
    }
}
