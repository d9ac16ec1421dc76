//! Menu service API
//!
//! [`MenuApi`] is the seam between the sync layer and the network. The
//! provided methods encode the two composite calls the sync layer relies
//! on: an all-or-nothing bulk fetch and update-with-create-fallback.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::{Category, MenuConcept, Product};

/// Everything a bulk fetch returns
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBundle {
    pub concepts: Vec<MenuConcept>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// Menu service operations
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// GET {base}/concepts
    async fn fetch_concepts(&self) -> ClientResult<Vec<MenuConcept>>;
    /// GET {base}/categories
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;
    /// GET {base}/products
    async fn fetch_products(&self) -> ClientResult<Vec<Product>>;
    /// PUT {base}/products/{id}
    async fn update_product(&self, product: &Product) -> ClientResult<()>;
    /// POST {base}/products
    async fn create_product(&self, product: &Product) -> ClientResult<()>;

    /// Fetch concepts, categories and products concurrently.
    ///
    /// Fails as a whole if any of the three requests fails; no partial
    /// result is ever returned.
    async fn fetch_all(&self) -> ClientResult<MenuBundle> {
        let (concepts, categories, products) = tokio::try_join!(
            self.fetch_concepts(),
            self.fetch_categories(),
            self.fetch_products(),
        )?;
        Ok(MenuBundle {
            concepts,
            categories,
            products,
        })
    }

    /// Update the product, creating it if the service does not know the id.
    ///
    /// Only a not-found answer triggers the create; it is attempted once.
    async fn create_or_update(&self, product: &Product) -> ClientResult<()> {
        match self.update_product(product).await {
            Err(e) if e.is_not_found() => {
                tracing::debug!(product_id = %product.id, "Product unknown to service, creating");
                self.create_product(product).await
            }
            other => other,
        }
    }
}

/// Network menu client
#[derive(Debug, Clone)]
pub struct NetworkMenuClient {
    client: Client,
    base_url: Url,
}

impl NetworkMenuClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::Validation(format!("invalid base URL {}: {}", config.base_url, e))
        })?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL of the menu service
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // status decides the error; the body is only the message
        let text = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
        }
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str) -> ClientResult<T> {
        let url = self.endpoint(&[resource])?;
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MenuApi for NetworkMenuClient {
    async fn fetch_concepts(&self) -> ClientResult<Vec<MenuConcept>> {
        self.get("concepts").await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("categories").await
    }

    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        self.get("products").await
    }

    async fn update_product(&self, product: &Product) -> ClientResult<()> {
        let url = self.endpoint(&["products", &product.id])?;
        let response = self.client.put(url).json(product).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn create_product(&self, product: &Product) -> ClientResult<()> {
        let url = self.endpoint(&["products"])?;
        let response = self.client.post(url).json(product).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
