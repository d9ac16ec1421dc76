//! Menu API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/concepts", get(handler::list_concepts))
        .route("/api/categories", get(handler::list_categories))
        .route(
            "/api/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route("/api/products/{id}", put(handler::update_product))
}
