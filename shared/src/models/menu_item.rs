//! Menu Item Model (local store row)

use serde::{Deserialize, Serialize};

/// Menu item as persisted in the terminal's local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Category reference (String ID)
    pub category_id: String,
    /// Price in currency unit
    pub price: f64,
    /// Tax rate in percentage (e.g., 10 = 10%)
    pub tax_rate: f64,
    pub is_available: bool,
}

impl From<&crate::Product> for MenuItem {
    fn from(product: &crate::Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            price: product.price,
            tax_rate: product.tax_rate,
            is_available: product.is_available,
        }
    }
}
