use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::Gazetteer;
use common::storage::BlobStore;
use common::storage::filesystem::FilesystemBlobStore;
use common::storage::s3::S3BlobStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::{AppConfig, StorageBackend, StorageConfig};
use server::state::AppState;
use server::utils::cache::QueryCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = server::database::init_db(&config.database).await?;
    server::seed::seed_admin(&db, &config.auth).await?;
    server::seed::ensure_indexes(&db).await?;

    let blob_store = build_blob_store(&config.storage).await?;

    let gazetteer = match &config.gazetteer.path {
        Some(path) => Gazetteer::from_file(path)
            .with_context(|| format!("Failed to load gazetteer from {}", path.display()))?,
        None => Gazetteer::builtin(),
    };
    info!(cities = gazetteer.len(), "Gazetteer loaded");

    let cache = QueryCache::new(Duration::from_secs(config.cache.stale_secs));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        blob_store,
        cache: Arc::new(cache),
        gazetteer: Arc::new(gazetteer),
    };

    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_blob_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    match storage.backend {
        StorageBackend::Filesystem => {
            let store =
                FilesystemBlobStore::new(storage.data_dir.clone(), storage.max_blob_size).await?;
            info!(path = %storage.data_dir.display(), "Using filesystem blob store");
            Ok(Arc::new(store))
        }
        StorageBackend::S3 => {
            let s3 = storage
                .s3
                .as_ref()
                .context("storage.s3 must be set when storage.backend = \"s3\"")?;
            let store = S3BlobStore::new(s3, storage.max_blob_size)?;
            info!(bucket = %s3.bucket, "Using S3 blob store");
            Ok(Arc::new(store))
        }
    }
}
