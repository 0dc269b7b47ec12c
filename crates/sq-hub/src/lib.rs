//! # sq-hub — Query Hub of SALESQ
//!
//! HTTP transport over the sales query engine. The dataset is loaded once
//! before the router is built and shared read-only through [`AppState`].

pub mod api;
pub mod config;

use axum::{routing::get, Router};
use sq_store::Store;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, DataConfig, ServerConfig};

pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn build_router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/sales", get(api::list_sales))
        .with_state(state);

    let app = if server.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };
    app.layer(TraceLayer::new_for_http())
}
