//! In-memory menu state and the pure operations on it

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use shared::{Category, InventoryItem, MenuConcept, Product, RecipeDefinition, SeedData};

use super::SyncError;

/// Connectivity and freshness summary published to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub loading: bool,
    pub offline: bool,
    /// Bumped on every change to the menu collections
    pub revision: u64,
}

/// Canonical local view of the menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub concepts: Vec<MenuConcept>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub inventory: Vec<InventoryItem>,
    pub recipes: Vec<RecipeDefinition>,
    pub loading: bool,
    pub error: Option<SyncError>,
    pub revision: u64,
}

/// How a changed product reaches the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WriteRoute {
    /// PUT, the id existed before the batch
    Update,
    /// POST, the id is new to local state
    Create,
}

/// A single remote write decided by the dirty check
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub route: WriteRoute,
    pub product: Product,
}

/// Remote writes left to do after a batch was applied locally
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlan {
    pub writes: Vec<PlannedWrite>,
    /// Items identical to their pre-batch value, no request needed
    pub skipped: usize,
}

impl MenuState {
    /// Fresh state from seed data; still loading, not yet offline
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            concepts: seed.concepts,
            categories: seed.categories,
            products: seed.products,
            inventory: seed.inventory,
            recipes: seed.recipes,
            loading: true,
            error: None,
            revision: 0,
        }
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            loading: self.loading,
            offline: self.error.is_some(),
            revision: self.revision,
        }
    }

    /// Replace in place when the id is known (order kept), append otherwise.
    ///
    /// Returns the value that was replaced.
    pub fn upsert_product(&mut self, product: Product) -> Option<Product> {
        self.revision += 1;
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => Some(std::mem::replace(slot, product)),
            None => {
                self.products.push(product);
                None
            }
        }
    }

    /// Merge a batch as one update and work out which items need a write.
    ///
    /// Every item is compared with the value its id had before the batch
    /// started. Identical items are skipped; the rest are routed by whether
    /// that id existed before the batch.
    pub fn apply_batch(&mut self, products: Vec<Product>) -> BatchPlan {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(self.products.len());
        for (i, p) in self.products.iter().enumerate() {
            index.entry(p.id.clone()).or_insert(i);
        }

        let mut plan = BatchPlan::default();
        for product in &products {
            match index.get(&product.id).map(|&i| &self.products[i]) {
                Some(previous) if previous == product => {
                    tracing::debug!(product_id = %product.id, "Unchanged, skipping remote write");
                    plan.skipped += 1;
                }
                Some(_) => plan.writes.push(PlannedWrite {
                    route: WriteRoute::Update,
                    product: product.clone(),
                }),
                None => plan.writes.push(PlannedWrite {
                    route: WriteRoute::Create,
                    product: product.clone(),
                }),
            }
        }

        for product in products {
            match index.get(&product.id) {
                Some(&i) => self.products[i] = product,
                None => {
                    index.insert(product.id.clone(), self.products.len());
                    self.products.push(product);
                }
            }
        }
        self.revision += 1;
        plan
    }

    pub fn categories_by_concept(&self, concept_id: &str) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.concept_id == concept_id)
            .collect()
    }

    pub fn products_by_category(&self, category_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    pub fn products_by_concept(&self, concept_id: &str) -> Vec<&Product> {
        let category_ids: HashSet<&str> = self
            .categories_by_concept(concept_id)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        self.products
            .iter()
            .filter(|p| category_ids.contains(p.category_id.as_str()))
            .collect()
    }

    pub fn recipe_for_product(&self, product_id: &str) -> Option<&RecipeDefinition> {
        self.recipes.iter().find(|r| r.product_id == product_id)
    }

    pub fn low_stock_items(&self) -> Vec<&InventoryItem> {
        self.inventory.iter().filter(|i| i.is_low_stock()).collect()
    }
}
