use std::{net::SocketAddr, sync::Arc};

use config::{StoreBackend, APP_CONFIG};
use database::AppDatabase;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod app;
pub mod config;
pub mod constants;
pub mod database;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod store;
pub mod swagger;
pub mod utils;

use app::AppState;
use storage::S3Storage;
use store::{Catalog, MemoryCatalog, MongoCatalog};

pub async fn start_web_server() -> anyhow::Result<()> {
    // import .env file
    dotenv().ok();
    initialize_logging();
    let catalog = build_catalog().await?;
    let storage = S3Storage::new(&APP_CONFIG).await;
    let state = AppState::new(catalog, Arc::new(storage));
    start_server(Arc::new(state)).await
}

fn initialize_logging() {
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or("movie_catalog_backend=debug".into());

    // initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

async fn build_catalog() -> anyhow::Result<Arc<dyn Catalog>> {
    match APP_CONFIG.store_backend {
        StoreBackend::Mongo => {
            // create database client
            let db_client = AppDatabase::new(&APP_CONFIG).await?;
            let catalog = MongoCatalog::new(Arc::new(db_client));
            catalog.ensure_indexes().await?;
            Ok(Arc::new(catalog))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory catalog, nothing will be persisted");
            Ok(Arc::new(MemoryCatalog::new()))
        }
    }
}

async fn start_server(state: Arc<AppState>) -> anyhow::Result<()> {
    // build the socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], APP_CONFIG.port));
    // create the app instance
    let app = app::build_app(state);
    tracing::debug!("Starting the app in: {addr}");
    // start serving the app in the socket address
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
