use std::sync::Arc;

use tokio::sync::RwLock;

use shared::{Category, MenuConcept, Product, SeedData};

use crate::core::Config;

/// Menu collections served by the API
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    pub concepts: Vec<MenuConcept>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl MenuCatalog {
    /// Replace by id, or append when the id is new
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }
}

impl From<SeedData> for MenuCatalog {
    fn from(seed: SeedData) -> Self {
        Self {
            concepts: seed.concepts,
            categories: seed.categories,
            products: seed.products,
        }
    }
}

/// Shared handler state, cheap to clone
#[derive(Debug, Clone)]
pub struct ServerState {
    pub catalog: Arc<RwLock<MenuCatalog>>,
}

impl ServerState {
    /// Seed-initialised state
    pub fn initialize(config: &Config) -> Self {
        if config.is_development() {
            tracing::debug!("Serving built-in seed menu");
        }
        Self::with_catalog(shared::seed::snapshot().into())
    }

    pub fn with_catalog(catalog: MenuCatalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}
