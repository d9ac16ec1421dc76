//! Scriptable in-memory [`MenuApi`] for sync tests

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::http::{MenuApi, MenuBundle};
use crate::{ClientError, ClientResult};
use shared::{Category, MenuConcept, Product};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Get(&'static str),
    Put(String),
    Post(String),
}

/// Which bulk endpoint fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resource {
    Concepts,
    Categories,
    Products,
}

#[derive(Default)]
pub(crate) struct MockMenuApi {
    pub bundle: Option<MenuBundle>,
    pub failing_fetch: Option<Resource>,
    /// Bulk fetch never completes
    pub hang_fetch: bool,
    /// Ids the PUT endpoint knows; anything else answers 404
    pub known_ids: HashSet<String>,
    pub fail_writes: bool,
    /// Only POST fails
    pub fail_creates: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl MockMenuApi {
    pub fn serving(bundle: MenuBundle) -> Self {
        let known_ids = bundle.products.iter().map(|p| p.id.clone()).collect();
        Self {
            bundle: Some(bundle),
            known_ids,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            failing_fetch: Some(Resource::Concepts),
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Get(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn read<T>(
        &self,
        resource: Resource,
        name: &'static str,
        pick: impl FnOnce(&MenuBundle) -> T,
    ) -> ClientResult<T> {
        self.record(Call::Get(name));
        if self.hang_fetch {
            std::future::pending::<()>().await;
        }
        if self.failing_fetch == Some(resource) {
            return Err(ClientError::Status {
                status: 503,
                body: format!("{} unavailable", name),
            });
        }
        self.bundle
            .as_ref()
            .map(pick)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl MenuApi for MockMenuApi {
    async fn fetch_concepts(&self) -> ClientResult<Vec<MenuConcept>> {
        self.read(Resource::Concepts, "concepts", |b| b.concepts.clone())
            .await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.read(Resource::Categories, "categories", |b| b.categories.clone())
            .await
    }

    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        self.read(Resource::Products, "products", |b| b.products.clone())
            .await
    }

    async fn update_product(&self, product: &Product) -> ClientResult<()> {
        self.record(Call::Put(product.id.clone()));
        if self.fail_writes {
            return Err(ClientError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        if !self.known_ids.contains(&product.id) {
            return Err(ClientError::NotFound(product.id.clone()));
        }
        Ok(())
    }

    async fn create_product(&self, product: &Product) -> ClientResult<()> {
        self.record(Call::Post(product.id.clone()));
        if self.fail_writes || self.fail_creates {
            return Err(ClientError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        Ok(())
    }
}
