//! Product Model

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Product entity
///
/// Only `id` and `category_id` are required. Everything else is payload and
/// falls back to a default when the server leaves it out. Fields this client
/// does not model are kept in `extra` so a save never drops data the server
/// sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    /// Category reference (String ID)
    pub category_id: String,
    #[serde(default)]
    pub name: String,
    /// Price in currency unit
    #[serde(default)]
    pub price: f64,
    /// Tax rate in percentage (e.g., 10 = 10%, 8.5 = 8.5%)
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            name: name.into(),
            price,
            tax_rate: 0.0,
            image: None,
            description: None,
            is_available: true,
            sort_order: 0,
            extra: serde_json::Map::new(),
        }
    }
}
