//! Recipe Model

use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Inventory item reference (String ID)
    pub inventory_item_id: String,
    pub quantity: f64,
}

/// Recipe definition, maps a product to the stock it consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDefinition {
    pub id: String,
    /// Product reference (String ID)
    pub product_id: String,
    pub ingredients: Vec<RecipeIngredient>,
}
