#![forbid(unsafe_code)]
//! HTTP surface for the catalog. Thin handlers over `mercata-catalog`:
//! parameter parsing and error mapping live in `mercata-api`, business
//! rules below the handlers, persistence behind the store trait.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use mercata_catalog::locks::IdLockArena;
use mercata_catalog::{CatalogService, ReviewAggregator};
use mercata_store::ProductStore;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

mod config;
mod http;

pub use config::{validate_startup_config, ApiConfig};

pub const CRATE_NAME: &str = "mercata-server";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub reviews: Arc<ReviewAggregator>,
    pub api: Arc<ApiConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, api: ApiConfig) -> Self {
        // One lock arena for every mutating path, so catalog updates and
        // review appends on the same product serialize with each other.
        let locks = Arc::new(IdLockArena::new());
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&store), Arc::clone(&locks))),
            reviews: Arc::new(ReviewAggregator::new(store, locks)),
            api: Arc::new(api),
        }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.api.request_timeout;
    let max_body_bytes = state.api.max_body_bytes;
    Router::new()
        .route(
            "/api/products",
            get(http::products::list_products).post(http::products::create_product),
        )
        .route("/api/products/top", get(http::products::top_products))
        .route(
            "/api/products/:id",
            get(http::products::get_product)
                .put(http::products::update_product)
                .delete(http::products::delete_product),
        )
        .route(
            "/api/products/:id/reviews",
            post(http::products::create_review),
        )
        .fallback(http::products::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
