//! Seed menu data
//!
//! The terminal boots from this snapshot and falls back to it when the
//! menu service cannot be reached. The snapshot itself is immutable; every
//! consumer receives its own copy through [`snapshot`].

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::{
    Category, InventoryItem, MenuConcept, Product, RecipeDefinition, RecipeIngredient,
};

/// Full set of seed collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub concepts: Vec<MenuConcept>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub inventory: Vec<InventoryItem>,
    pub recipes: Vec<RecipeDefinition>,
}

static SEED: LazyLock<SeedData> = LazyLock::new(build_seed);

/// Owned copy of the seed collections
pub fn snapshot() -> SeedData {
    SEED.clone()
}

fn concept(id: &str, name: &str, color: &str) -> MenuConcept {
    MenuConcept {
        color: Some(color.to_string()),
        ..MenuConcept::new(id, name)
    }
}

fn category(id: &str, concept_id: &str, name: &str, sort_order: i32) -> Category {
    Category {
        sort_order,
        ..Category::new(id, concept_id, name)
    }
}

fn product(id: &str, category_id: &str, name: &str, price: f64, tax_rate: f64) -> Product {
    Product {
        tax_rate,
        ..Product::new(id, category_id, name, price)
    }
}

fn stock(id: &str, name: &str, unit: &str, quantity: f64, reorder_level: f64) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        quantity,
        reorder_level,
    }
}

fn recipe(id: &str, product_id: &str, ingredients: &[(&str, f64)]) -> RecipeDefinition {
    RecipeDefinition {
        id: id.to_string(),
        product_id: product_id.to_string(),
        ingredients: ingredients
            .iter()
            .map(|(item, quantity)| RecipeIngredient {
                inventory_item_id: item.to_string(),
                quantity: *quantity,
            })
            .collect(),
    }
}

fn build_seed() -> SeedData {
    SeedData {
        concepts: vec![
            concept("concept-cafe", "Corner Cafe", "#c0843d"),
            concept("concept-grill", "Smokehouse Grill", "#8b2c1f"),
        ],
        categories: vec![
            category("cat-coffee", "concept-cafe", "Coffee", 1),
            category("cat-pastry", "concept-cafe", "Pastries", 2),
            category("cat-mains", "concept-grill", "Mains", 1),
            category("cat-sides", "concept-grill", "Sides", 2),
        ],
        products: vec![
            product("prod-espresso", "cat-coffee", "Espresso", 2.20, 10.0),
            product("prod-flat-white", "cat-coffee", "Flat White", 3.40, 10.0),
            product("prod-latte", "cat-coffee", "Latte", 3.60, 10.0),
            product("prod-croissant", "cat-pastry", "Butter Croissant", 2.80, 10.0),
            product("prod-cinnamon-roll", "cat-pastry", "Cinnamon Roll", 3.20, 10.0),
            product("prod-brisket", "cat-mains", "Brisket Plate", 18.50, 10.0),
            product("prod-ribs", "cat-mains", "Half Rack Ribs", 21.00, 10.0),
            product("prod-fries", "cat-sides", "Fries", 4.50, 10.0),
            product("prod-slaw", "cat-sides", "Coleslaw", 3.80, 10.0),
        ],
        inventory: vec![
            stock("inv-beans", "Espresso Beans", "kg", 6.0, 2.0),
            stock("inv-milk", "Whole Milk", "l", 12.0, 4.0),
            stock("inv-dough", "Croissant Dough", "pcs", 18.0, 10.0),
            stock("inv-brisket", "Brisket", "kg", 3.0, 5.0),
            stock("inv-potatoes", "Potatoes", "kg", 20.0, 8.0),
        ],
        recipes: vec![
            recipe("rec-espresso", "prod-espresso", &[("inv-beans", 0.018)]),
            recipe(
                "rec-flat-white",
                "prod-flat-white",
                &[("inv-beans", 0.018), ("inv-milk", 0.15)],
            ),
            recipe(
                "rec-latte",
                "prod-latte",
                &[("inv-beans", 0.018), ("inv-milk", 0.25)],
            ),
            recipe("rec-croissant", "prod-croissant", &[("inv-dough", 1.0)]),
            recipe("rec-brisket", "prod-brisket", &[("inv-brisket", 0.3)]),
            recipe("rec-fries", "prod-fries", &[("inv-potatoes", 0.25)]),
        ],
    }
}
