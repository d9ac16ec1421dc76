//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::{Category, MenuConcept, Product};

use crate::core::{Result, ServerError, ServerState};

/// GET /api/concepts
pub async fn list_concepts(State(state): State<ServerState>) -> Json<Vec<MenuConcept>> {
    Json(state.catalog.read().await.concepts.clone())
}

/// GET /api/categories
pub async fn list_categories(State(state): State<ServerState>) -> Json<Vec<Category>> {
    Json(state.catalog.read().await.categories.clone())
}

/// GET /api/products
pub async fn list_products(State(state): State<ServerState>) -> Json<Vec<Product>> {
    Json(state.catalog.read().await.products.clone())
}

/// PUT /api/products/:id - replace an existing product
pub async fn update_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(product): Json<Product>,
) -> Result<Json<Product>> {
    if product.id != id {
        return Err(ServerError::Validation(format!(
            "Body id {} does not match path id {}",
            product.id, id
        )));
    }

    let mut catalog = state.catalog.write().await;
    let slot = catalog
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ServerError::NotFound(format!("Product {}", id)))?;
    *slot = product.clone();

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(product))
}

/// POST /api/products - create (an existing id is overwritten)
pub async fn create_product(
    State(state): State<ServerState>,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<Product>)> {
    if product.id.trim().is_empty() {
        return Err(ServerError::Validation("Product id is required".into()));
    }

    state.catalog.write().await.upsert_product(product.clone());

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}
