//! Catalog Server - storefront API over a remote product catalog.
//!
//! Serves home, shop, product detail, admin and cart endpoints. Remote
//! products are fetched on every request and merged with the local overlay
//! by catalog-engine.

mod catalog;
mod config;
mod db;
mod error;
mod handlers;
mod routes;
mod storage;

use crate::catalog::{CatalogSource, HttpCatalog};
use crate::config::Config;
use crate::storage::{MemorySlotStore, SlotStore};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub slots: Arc<dyn SlotStore>,
    pub catalog: Arc<dyn CatalogSource>,
    pub config: Arc<Config>,
    /// Held from load to persist by every mutating handler
    pub mutation_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(slots: Arc<dyn SlotStore>, catalog: Arc<dyn CatalogSource>, config: Config) -> Self {
        Self {
            slots,
            catalog,
            config: Arc::new(config),
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Catalog Server on {}:{}", config.host, config.port);

    let slots: Arc<dyn SlotStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await?;

            Arc::new(db::PgSlotStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, slots are kept in memory");
            Arc::new(MemorySlotStore::new())
        }
    };

    tracing::info!("Remote catalog at {}", config.catalog_api_url);
    let catalog = Arc::new(HttpCatalog::new(config.catalog_api_url.clone())?);

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(slots, catalog, config);

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
