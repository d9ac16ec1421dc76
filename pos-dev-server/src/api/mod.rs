//! HTTP API

pub mod health;
pub mod menu;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Full application router with middleware
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
