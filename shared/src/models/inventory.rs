//! Inventory Model

use serde::{Deserialize, Serialize};

/// Stock item, read-only for the terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Unit of measure (e.g., "kg", "l", "pcs")
    pub unit: String,
    pub quantity: f64,
    /// Quantity at or below which the item counts as low stock
    pub reorder_level: f64,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}
