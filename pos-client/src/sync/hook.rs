use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{OnceCell, RwLock, watch};
use tokio::task::JoinHandle;

use shared::{Category, InventoryItem, MenuConcept, Product, RecipeDefinition, SeedData};

use super::state::{BatchPlan, MenuState, SyncStatus, WriteRoute};
use super::SyncError;
use crate::http::MenuApi;

/// Offline-first menu store backed by a [`MenuApi`]
///
/// Collections are usable immediately after construction (seed data).
/// [`MenuSync::initial_load`] swaps in the service's menu when it answers
/// and flips to [`SyncError::OfflineMode`] when it does not.
///
/// Saves are split into a local phase and a remote phase. The combined
/// calls ([`save_product`](Self::save_product),
/// [`save_batch_products`](Self::save_batch_products)) always finish the
/// local phase before the first request goes out. Overlapping saves are
/// not serialized against each other: local state follows call order and
/// the service keeps whichever write lands last.
pub struct MenuSync<A> {
    api: A,
    state: RwLock<MenuState>,
    status_tx: watch::Sender<SyncStatus>,
    initial_load: OnceCell<()>,
}

impl<A: MenuApi> MenuSync<A> {
    /// Start from the built-in seed menu
    pub fn new(api: A) -> Self {
        Self::with_seed(api, shared::seed::snapshot())
    }

    /// Start from the given seed menu
    pub fn with_seed(api: A, seed: SeedData) -> Self {
        let state = MenuState::from_seed(seed);
        let (status_tx, _) = watch::channel(state.status());
        Self {
            api,
            state: RwLock::new(state),
            status_tx,
            initial_load: OnceCell::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Watch loading/offline/revision changes
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status_tx.subscribe()
    }

    pub fn status(&self) -> SyncStatus {
        *self.status_tx.borrow()
    }

    fn publish(&self, state: &MenuState) {
        self.status_tx.send_replace(state.status());
    }

    // ========== Initial load ==========

    /// Pull the full menu from the service, once per instance.
    ///
    /// Later calls wait for the first one and then return without touching
    /// the network.
    pub async fn initial_load(&self) {
        self.initial_load.get_or_init(|| self.load_remote()).await;
    }

    /// Run [`initial_load`](Self::initial_load) on a background task
    pub fn spawn_initial_load(self: &Arc<Self>) -> JoinHandle<()>
    where
        A: 'static,
    {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.initial_load().await })
    }

    async fn load_remote(&self) {
        let result = self.api.fetch_all().await;
        let mut state = self.state.write().await;
        match result {
            Ok(bundle) => {
                tracing::info!(
                    concepts = bundle.concepts.len(),
                    categories = bundle.categories.len(),
                    products = bundle.products.len(),
                    "Menu loaded from service"
                );
                state.concepts = bundle.concepts;
                state.categories = bundle.categories;
                state.products = bundle.products;
                state.error = None;
                state.revision += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu service unreachable, using local data");
                state.error = Some(SyncError::OfflineMode);
            }
        }
        state.loading = false;
        self.publish(&state);
    }

    // ========== Single save ==========

    /// Local phase of a save: replace by id or append
    pub async fn apply_local(&self, product: Product) {
        let mut state = self.state.write().await;
        state.upsert_product(product);
        self.publish(&state);
    }

    /// Remote phase of a save.
    ///
    /// Returns `false` when the product only exists locally.
    pub async fn persist(&self, product: &Product) -> bool {
        match self.api.create_or_update(product).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(product_id = %product.id, error = %e, "Product saved locally only");
                false
            }
        }
    }

    /// Apply locally, then push to the service
    pub async fn save_product(&self, product: Product) -> bool {
        self.apply_local(product.clone()).await;
        self.persist(&product).await
    }

    // ========== Batch save ==========

    /// Local phase of a batch save, see [`MenuState::apply_batch`]
    pub async fn apply_local_batch(&self, products: Vec<Product>) -> BatchPlan {
        let mut state = self.state.write().await;
        let plan = state.apply_batch(products);
        self.publish(&state);
        plan
    }

    /// Remote phase of a batch save.
    ///
    /// All writes run concurrently and are awaited to completion. Failures
    /// are logged and otherwise ignored; the result is always `true`.
    pub async fn persist_batch(&self, plan: BatchPlan) -> bool {
        let total = plan.writes.len();
        let results = join_all(plan.writes.into_iter().map(|write| async move {
            let result = match write.route {
                WriteRoute::Update => self.api.update_product(&write.product).await,
                WriteRoute::Create => self.api.create_product(&write.product).await,
            };
            if let Err(e) = &result {
                tracing::warn!(
                    product_id = %write.product.id,
                    route = ?write.route,
                    error = %e,
                    "Batch item saved locally only"
                );
            }
            result.is_ok()
        }))
        .await;

        let failed = results.iter().filter(|ok| !**ok).count();
        tracing::info!(
            written = total - failed,
            failed,
            skipped = plan.skipped,
            "Batch save settled"
        );
        true
    }

    /// Apply a batch locally, then push the changed items to the service
    pub async fn save_batch_products(&self, products: Vec<Product>) -> bool {
        let plan = self.apply_local_batch(products).await;
        self.persist_batch(plan).await
    }

    // ========== Reads ==========

    /// Owned copy of the whole state
    pub async fn snapshot(&self) -> MenuState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<SyncError> {
        self.state.read().await.error
    }

    pub async fn concepts(&self) -> Vec<MenuConcept> {
        self.state.read().await.concepts.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.categories.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn inventory(&self) -> Vec<InventoryItem> {
        self.state.read().await.inventory.clone()
    }

    pub async fn recipes(&self) -> Vec<RecipeDefinition> {
        self.state.read().await.recipes.clone()
    }

    pub async fn categories_by_concept(&self, concept_id: &str) -> Vec<Category> {
        let state = self.state.read().await;
        state
            .categories_by_concept(concept_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn products_by_category(&self, category_id: &str) -> Vec<Product> {
        let state = self.state.read().await;
        state
            .products_by_category(category_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn products_by_concept(&self, concept_id: &str) -> Vec<Product> {
        let state = self.state.read().await;
        state
            .products_by_concept(concept_id)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::http::MenuBundle;
    use crate::sync::mock::{Call, MockMenuApi, Resource};

    fn remote_bundle() -> MenuBundle {
        MenuBundle {
            concepts: vec![MenuConcept::new("remote-concept", "Night Market")],
            categories: vec![
                Category::new("remote-noodles", "remote-concept", "Noodles"),
                Category::new("remote-buns", "remote-concept", "Buns"),
            ],
            products: vec![
                Product::new("remote-ramen", "remote-noodles", "Shoyu Ramen", 13.0),
                Product::new("remote-udon", "remote-noodles", "Kake Udon", 11.0),
                Product::new("remote-bao", "remote-buns", "Pork Bao", 6.5),
                Product::new("remote-gua", "remote-buns", "Gua Bao", 7.0),
            ],
        }
    }

    #[tokio::test]
    async fn test_seed_available_before_load() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        let seed = shared::seed::snapshot();

        let state = sync.snapshot().await;
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.concepts, seed.concepts);
        assert_eq!(state.categories, seed.categories);
        assert_eq!(state.products, seed.products);
        assert!(sync.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_load_replaces_state() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));

        sync.initial_load().await;

        let bundle = remote_bundle();
        let state = sync.snapshot().await;
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.concepts, bundle.concepts);
        assert_eq!(state.categories, bundle.categories);
        assert_eq!(state.products, bundle.products);
        // seed-only collections stay
        assert_eq!(state.inventory, shared::seed::snapshot().inventory);
    }

    #[tokio::test]
    async fn test_failed_load_preserves_state() {
        for failing in [Resource::Concepts, Resource::Categories, Resource::Products] {
            let api = MockMenuApi {
                failing_fetch: Some(failing),
                ..MockMenuApi::serving(remote_bundle())
            };
            let sync = MenuSync::new(api);

            sync.initial_load().await;

            let seed = shared::seed::snapshot();
            let state = sync.snapshot().await;
            assert!(!state.loading, "{:?}", failing);
            assert_eq!(state.error, Some(SyncError::OfflineMode));
            assert_eq!(state.error.unwrap().to_string(), "Offline Mode");
            assert_eq!(state.concepts, seed.concepts);
            assert_eq!(state.categories, seed.categories);
            assert_eq!(state.products, seed.products);
        }
    }

    #[tokio::test]
    async fn test_initial_load_runs_once() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));

        sync.initial_load().await;
        sync.initial_load().await;

        let gets = sync
            .api()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Get(_)))
            .count();
        assert_eq!(gets, 3);
    }

    #[tokio::test]
    async fn test_hung_load_keeps_loading_and_saves_still_apply() {
        let api = MockMenuApi {
            hang_fetch: true,
            ..MockMenuApi::serving(remote_bundle())
        };
        let sync = Arc::new(MenuSync::new(api));

        let handle = sync.spawn_initial_load();
        let waited = tokio::time::timeout(Duration::from_millis(50), handle).await;
        assert!(waited.is_err());
        assert!(sync.is_loading().await);

        sync.apply_local(Product::new("walk-in", "cat-coffee", "Cortado", 3.0))
            .await;
        assert!(sync.products().await.iter().any(|p| p.id == "walk-in"));
    }

    #[tokio::test]
    async fn test_save_new_product_offline_applies_locally() {
        let sync = MenuSync::new(MockMenuApi::unreachable());
        let product = Product::new("prod-mocha", "cat-coffee", "Mocha", 4.2);

        let synced = sync.save_product(product.clone()).await;

        assert!(!synced);
        assert_eq!(sync.products().await.last(), Some(&product));
    }

    #[tokio::test]
    async fn test_save_existing_product_updates_in_place() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        sync.initial_load().await;
        let mut udon = Product::new("remote-udon", "remote-noodles", "Kake Udon", 12.0);
        udon.is_available = false;

        assert!(sync.save_product(udon.clone()).await);

        let products = sync.products().await;
        assert_eq!(products[1], udon);
        assert_eq!(products.len(), 4);
        assert_eq!(sync.api().write_calls(), vec![Call::Put("remote-udon".into())]);
    }

    #[tokio::test]
    async fn test_not_found_on_update_creates_once() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        let product = Product::new("brand-new", "remote-buns", "Fish Bao", 7.5);

        assert!(sync.save_product(product).await);

        assert_eq!(
            sync.api().write_calls(),
            vec![Call::Put("brand-new".into()), Call::Post("brand-new".into())]
        );
    }

    #[tokio::test]
    async fn test_other_update_failure_does_not_create() {
        let api = MockMenuApi {
            fail_writes: true,
            ..MockMenuApi::serving(remote_bundle())
        };
        let sync = MenuSync::new(api);
        let product = Product::new("remote-bao", "remote-buns", "Pork Bao", 6.0);

        assert!(!sync.save_product(product).await);

        assert_eq!(sync.api().write_calls(), vec![Call::Put("remote-bao".into())]);
    }

    #[tokio::test]
    async fn test_failed_create_fallback_keeps_local_product() {
        let api = MockMenuApi {
            fail_creates: true,
            ..MockMenuApi::serving(remote_bundle())
        };
        let sync = MenuSync::new(api);
        sync.initial_load().await;
        let product = Product::new("remote-dumpling", "remote-buns", "Dumplings", 7.0);

        assert!(!sync.save_product(product.clone()).await);

        assert_eq!(
            sync.api().write_calls(),
            vec![
                Call::Put("remote-dumpling".into()),
                Call::Post("remote-dumpling".into())
            ]
        );
        assert_eq!(sync.products().await.last(), Some(&product));
        assert_eq!(sync.error().await, None);
    }

    #[tokio::test]
    async fn test_batch_skips_unchanged_items() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        sync.initial_load().await;
        let products = sync.products().await;
        let unchanged = products[0].clone();
        let mut changed = products[1].clone();
        changed.name = "Kake Udon (large)".to_string();

        assert!(sync.save_batch_products(vec![unchanged, changed.clone()]).await);

        assert_eq!(sync.api().write_calls(), vec![Call::Put(changed.id.clone())]);
        assert_eq!(sync.products().await[1], changed);
    }

    #[tokio::test]
    async fn test_batch_routes_by_pre_batch_snapshot() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        sync.initial_load().await;

        let mut ramen = sync.products().await[0].clone();
        ramen.price = 14.0;
        let fresh = Product::new("remote-dumplings", "remote-buns", "Dumplings", 8.0);

        sync.save_batch_products(vec![ramen, fresh]).await;

        let mut writes = sync.api().write_calls();
        writes.sort_by_key(|c| format!("{:?}", c));
        assert_eq!(
            writes,
            vec![
                Call::Post("remote-dumplings".into()),
                Call::Put("remote-ramen".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_batch_resolves_true_when_every_write_fails() {
        let sync = MenuSync::new(MockMenuApi::unreachable());
        let batch = vec![
            Product::new("prod-espresso", "cat-coffee", "Double Espresso", 2.9),
            Product::new("prod-affogato", "cat-coffee", "Affogato", 4.8),
        ];

        assert!(sync.save_batch_products(batch.clone()).await);

        assert_eq!(sync.api().write_calls().len(), 2);
        let products = sync.products().await;
        assert!(batch.iter().all(|b| products.contains(b)));
    }

    #[tokio::test]
    async fn test_batch_applied_before_persist_phase() {
        let sync = MenuSync::new(MockMenuApi::unreachable());

        let plan = sync
            .apply_local_batch(vec![Product::new("late", "cat-sides", "Onion Rings", 5.0)])
            .await;

        assert!(sync.api().write_calls().is_empty());
        assert!(sync.products().await.iter().any(|p| p.id == "late"));
        assert_eq!(plan.writes.len(), 1);
        assert!(sync.persist_batch(plan).await);
    }

    #[tokio::test]
    async fn test_products_by_concept_after_load() {
        let sync = MenuSync::new(MockMenuApi::serving(remote_bundle()));
        sync.initial_load().await;

        let products = sync.products_by_concept("remote-concept").await;
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["remote-ramen", "remote-udon", "remote-bao", "remote-gua"]);
        assert_eq!(sync.categories_by_concept("remote-concept").await.len(), 2);
        assert_eq!(sync.products_by_category("remote-buns").await.len(), 2);
    }

    #[tokio::test]
    async fn test_status_published_to_subscribers() {
        let sync = MenuSync::new(MockMenuApi::unreachable());
        let mut rx = sync.subscribe();
        assert!(rx.borrow().loading);

        sync.initial_load().await;

        assert!(rx.has_changed().unwrap());
        let status = *rx.borrow_and_update();
        assert!(!status.loading);
        assert!(status.offline);

        sync.apply_local(Product::new("x", "cat-coffee", "X", 1.0)).await;
        assert!(sync.status().revision > status.revision);
    }
}
